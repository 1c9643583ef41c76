//! Reference [`VectorCache`] backed by `moka`'s async, size-aware cache.

use super::{VectorCache, VectorSource};
use crate::context::PrefillContext;
use crate::error::CacheError;
use crate::graph::VectorId;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;

/// An in-memory [`VectorCache`] fronting a [`VectorSource`].
///
/// On a miss, `load` fetches the vector from `source` and admits it into
/// the underlying `moka::future::Cache`, which handles eviction and
/// concurrent-miss coalescing on its own — this crate only ever calls
/// `load`, never evicts or resizes (§1 Non-goals).
pub struct MokaVectorCache<S: VectorSource> {
    entries: Cache<VectorId, Arc<Vec<f32>>>,
    source: S,
    capacity: i64,
}

impl<S: VectorSource> MokaVectorCache<S> {
    /// Creates a cache that can hold up to `capacity` vectors, pulling
    /// misses from `source`.
    pub fn new(capacity: u64, source: S) -> Self {
        Self {
            entries: Cache::new(capacity),
            source,
            capacity: capacity as i64,
        }
    }

    /// Number of vectors currently resident, for tests and diagnostics.
    ///
    /// `moka` maintains its internal structures on a background sweep;
    /// `run_pending_tasks` drives that sweep synchronously so the count is
    /// accurate immediately after a burst of inserts, which otherwise only
    /// matters for tests.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

#[async_trait]
impl<S: VectorSource> VectorCache for MokaVectorCache<S> {
    async fn load(&self, _ctx: &PrefillContext, id: VectorId) -> Result<Arc<Vec<f32>>, CacheError> {
        self.entries
            .try_get_with(id, async {
                self.source.fetch(id).await.map(Arc::new)
            })
            .await
            .map_err(|e: Arc<CacheError>| (*e).clone())
    }

    fn current_capacity(&self) -> i64 {
        self.capacity
    }
}
