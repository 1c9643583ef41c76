//! Error types for the graph and cache contracts the prefiller depends on.
//!
//! The prefill driver itself never returns an error (see `prefill` module docs);
//! these types exist for the reference `ShardedGraph` / `MokaVectorCache`
//! implementations and for callers that use the cache directly outside of a
//! prefill run.

use thiserror::Error;

/// Errors surfaced by [`crate::cache::VectorCache`] implementations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CacheError {
    /// No vector exists for the requested id in the backing `VectorSource`.
    #[error("no vector for id {0}")]
    NotFound(u64),

    /// The backing source failed to produce a vector (e.g. a transient I/O error).
    #[error("vector source failed for id {0}: {1}")]
    SourceFailed(u64, String),
}

/// Errors surfaced while constructing a [`crate::graph::ShardedGraph`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// `shard_count` was not a power of two.
    #[error("shard count {0} is not a power of two")]
    InvalidShardCount(usize),

    /// A supplied node level exceeded the declared maximum layer.
    ///
    /// By invariant this should never happen; callers that hit it have a bug
    /// in whatever built the level table. The traversal path itself never
    /// returns this — at traversal time an out-of-range level is clamped
    /// rather than rejected (see `prefill` module docs, "Invariant violation").
    #[error("node {id} has level {level} above declared max layer {max_layer}")]
    LevelAboveMaxLayer {
        /// The offending node id.
        id: u64,
        /// The level that was supplied for it.
        level: u8,
        /// The graph's declared maximum layer.
        max_layer: u8,
    },
}
