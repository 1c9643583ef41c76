//! The prefill driver: walks an HNSW graph top-down, emitting cache loads
//! until a budget is spent or the graph is exhausted.
//!
//! `prefill` never returns an error. Cancellation is a clean early return
//! (§7); a failed cache load is logged at `debug` and counted as attempted,
//! never retried, never surfaced to the caller (§4.1, §4.3).

use crate::cache::VectorCache;
use crate::config::PrefillConfig;
use crate::context::PrefillContext;
use crate::graph::{GraphView, VectorId};

/// Warms `cache` by walking `graph` from its highest layer down, in
/// ascending id order within each layer, until `limit` vectors have been
/// loaded (clamped by `cache.current_capacity()`) or cancellation is
/// observed.
///
/// Equivalent to [`prefill_with_config`] with a default [`PrefillConfig`].
pub async fn prefill<G, C>(graph: &G, cache: &C, ctx: &PrefillContext, limit: u64)
where
    G: GraphView,
    C: VectorCache,
{
    prefill_with_config(graph, cache, ctx, limit, &PrefillConfig::default()).await
}

/// As [`prefill`], but takes the requested budget from `config.limit`
/// instead of a separate argument — the production path for a deployment
/// that configures its default warm-up budget once via [`PrefillConfig`]
/// rather than threading a `limit` through every call site.
pub async fn prefill_using_config<G, C>(graph: &G, cache: &C, ctx: &PrefillContext, config: &PrefillConfig)
where
    G: GraphView,
    C: VectorCache,
{
    prefill_with_config(graph, cache, ctx, config.limit, config).await
}

/// As [`prefill`], but with explicit control over whether swallowed cache
/// errors are logged (`config.log_cache_failures`).
pub async fn prefill_with_config<G, C>(
    graph: &G,
    cache: &C,
    ctx: &PrefillContext,
    limit: u64,
    config: &PrefillConfig,
) where
    G: GraphView,
    C: VectorCache,
{
    let capacity = cache.current_capacity();
    if capacity <= 0 || limit == 0 {
        return;
    }
    let budget = limit.min(capacity as u64);

    let buckets = bucket_by_layer(graph);
    let mut loaded: u64 = 0;

    for bucket in buckets.iter().rev() {
        for &id in bucket {
            if loaded >= budget {
                return;
            }
            if ctx.is_cancelled() {
                tracing::debug!(loaded, budget, "prefill cancelled");
                return;
            }

            if let Err(err) = cache.load(ctx, id).await {
                if config.log_cache_failures {
                    tracing::debug!(id, error = %err, "prefill cache load failed; skipping");
                }
            }
            loaded += 1;
        }
    }
}

/// Precomputes, in a single ascending pass over the node table, a bucket
/// per layer holding the ids whose level equals that layer exactly.
///
/// A node with level `k` appears in `{ id | level(id) >= L }` for every
/// `L <= k`, but since the driver walks layers from `M` down to `0` and
/// removes ids from further consideration once loaded, `k` is the *first*
/// layer at which that node is ever a candidate. So bucketing by exact
/// level and walking buckets `M..=0` produces the same sequence as the
/// naive `{ id | level(id) >= L } \ Loaded` re-scan at every layer, while
/// touching each node exactly once here (§9 "Avoiding re-enumeration").
///
/// A level above the graph's declared `max_layer` is clamped rather than
/// trusted, per the defensive policy in §7 — this should never happen by
/// invariant, but a misbehaving `GraphView` should not be able to panic
/// prefill by indexing past the bucket array.
fn bucket_by_layer<G: GraphView>(graph: &G) -> Vec<Vec<VectorId>> {
    let max_layer = graph.max_layer();
    let mut buckets: Vec<Vec<VectorId>> = vec![Vec::new(); max_layer as usize + 1];

    for id in 0..graph.len() as VectorId {
        let descriptor = graph.descriptor(id);
        let level = descriptor.level.min(max_layer);
        buckets[level as usize].push(descriptor.id);
    }

    buckets
}
