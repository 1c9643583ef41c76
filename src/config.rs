//! Tunable knobs for the prefiller and its reference graph implementation.
//!
//! Mirrors the small `*Config` structs the surrounding system attaches to
//! each of its cache/shard/lock subsystems: plain data, a sane `Default`,
//! no parsing of files or environment variables.

/// Default stripe width for a newly constructed [`crate::graph::ShardedGraph`].
pub const DEFAULT_SHARD_COUNT: usize = 128;

/// Configuration for a prefill run and the graph it operates over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefillConfig {
    /// Default requested warm-up budget, used by
    /// [`crate::prefill::prefill_using_config`]; overridable per call via
    /// [`crate::prefill::prefill`] / [`crate::prefill::prefill_with_config`],
    /// which take their own `limit` argument instead.
    pub limit: u64,

    /// Stripe width `S` for a [`crate::graph::ShardedGraph`] built via
    /// [`crate::graph::ShardedGraph::from_levels_with_config`]. Must be a
    /// power of two.
    pub shard_count: usize,

    /// Whether swallowed cache-load errors are logged at `debug` level.
    /// Disable for deployments where even debug-level noise is too chatty
    /// during bulk warm-up.
    pub log_cache_failures: bool,
}

impl Default for PrefillConfig {
    fn default() -> Self {
        Self {
            limit: 0,
            shard_count: DEFAULT_SHARD_COUNT,
            log_cache_failures: true,
        }
    }
}

impl PrefillConfig {
    /// Builds a config requesting `limit` vectors with otherwise-default settings.
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}
