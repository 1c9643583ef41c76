//! The cache contract the prefill driver warms, and a reference in-memory
//! implementation of it.
//!
//! The real cache is a much larger subsystem (eviction, resizing, tiering);
//! all of that is out of scope here (§1 Non-goals). `VectorCache` names
//! only the two operations the prefiller actually calls.

mod moka_cache;

pub use moka_cache::MokaVectorCache;

use crate::context::PrefillContext;
use crate::error::CacheError;
use crate::graph::VectorId;
use async_trait::async_trait;
use std::sync::Arc;

/// A mapping from node id to vector payload, as consumed by the prefiller.
///
/// Implementations own their own synchronisation; the prefiller never
/// holds a shard lock while calling `load` (§5 Lock discipline).
#[async_trait]
pub trait VectorCache: Send + Sync {
    /// Returns the vector for `id`, admitting it into the cache as a side
    /// effect. The prefiller ignores the returned value and any error —
    /// a failed load still counts as "attempted" (§4.3).
    async fn load(&self, ctx: &PrefillContext, id: VectorId) -> Result<Arc<Vec<f32>>, CacheError>;

    /// A hint used to clamp the requested prefill `limit`. Negative or zero
    /// means "do no work".
    fn current_capacity(&self) -> i64;
}

/// Supplies the vector bytes behind a cache miss.
///
/// Stands in for the real index/storage layer, which is out of scope for
/// this crate — the prefiller never talks to a `VectorSource` directly,
/// only through a [`VectorCache`].
#[async_trait]
pub trait VectorSource: Send + Sync {
    /// Fetches the vector for `id`, or an error if none exists / the fetch failed.
    async fn fetch(&self, id: VectorId) -> Result<Vec<f32>, CacheError>;
}
