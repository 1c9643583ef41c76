//! The read-only graph view the prefill driver walks, and a reference
//! sharded-lock implementation of it.
//!
//! The real HNSW index owns far more than this (adjacency lists, vector
//! storage, the build/search algorithms) — all of that is out of scope here
//! and treated as an external collaborator. `GraphView` names only the
//! handful of reads the prefiller actually performs.

mod node;

pub use node::{NodeDescriptor, VectorId};

use crate::config::PrefillConfig;
use crate::error::GraphError;
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};

/// Read-only window onto the HNSW node table that the prefiller depends on.
///
/// Implementors are expected to guard per-node reads with a lock striped
/// over `shard_count()` shards, keyed by `id % shard_count()`, so that a
/// `level_of` call never blocks on more than one shard (§4.2).
pub trait GraphView: Send + Sync {
    /// Number of nodes currently in the graph.
    fn len(&self) -> usize;

    /// True if the graph has no nodes.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The current maximum layer `M`; every node's level is `<= M`.
    fn max_layer(&self) -> u8;

    /// The highest layer `id` appears on, read under the shard lock for
    /// `id % shard_count()` in shared mode.
    ///
    /// Out-of-range ids (`id >= len()`) return `0`, the same as an
    /// unpopulated node would — the prefiller never calls this for ids it
    /// hasn't already bucketed from a valid traversal, so this is a
    /// defensive default rather than a path that is expected to be hit.
    fn level_of(&self, id: VectorId) -> u8;

    /// Stripe width `S` of the sharded lock array protecting node reads.
    fn shard_count(&self) -> usize;

    /// The node descriptor for `id`: its id paired with its current level.
    ///
    /// Derived from `level_of`; implementors don't need to store
    /// descriptors separately, but callers that want both `id` and `level`
    /// together (the node table shape named by the data model) should use
    /// this rather than reassembling one by hand.
    fn descriptor(&self, id: VectorId) -> NodeDescriptor {
        NodeDescriptor {
            id,
            level: self.level_of(id),
        }
    }
}

/// A [`GraphView`] whose node levels are partitioned across `S` independently
/// lockable shards.
///
/// Node `id` lives in shard `id % S`, at local offset `id / S` within that
/// shard's private `Vec<u8>`. This keeps each shard's lock scope to exactly
/// the slice of the table it protects, with no hashing or sparse-map
/// overhead — `nodes[id].level` lookups are O(1) once the shard is
/// acquired, and shards are independent so readers of different ids never
/// contend.
#[derive(Debug)]
pub struct ShardedGraph {
    shards: Vec<RwLock<Vec<u8>>>,
    shard_count: usize,
    len: AtomicUsize,
    max_layer: AtomicU8,
    push_lock: Mutex<()>,
}

impl ShardedGraph {
    /// Builds a graph from a dense `levels` table (`levels[i]` is node `i`'s
    /// level), striped across `shard_count` shards, with the graph's
    /// current maximum layer declared explicitly as `max_layer`.
    ///
    /// `max_layer` is graph state distinct from any one node's level (§3):
    /// a graph may declare a maximum layer no node currently occupies yet.
    /// Returns [`GraphError::LevelAboveMaxLayer`] if any entry in `levels`
    /// exceeds the declared `max_layer`, and
    /// [`GraphError::InvalidShardCount`] if `shard_count` isn't a power of
    /// two.
    pub fn from_levels(levels: &[u8], max_layer: u8, shard_count: usize) -> Result<Self, GraphError> {
        if shard_count == 0 || !shard_count.is_power_of_two() {
            return Err(GraphError::InvalidShardCount(shard_count));
        }

        let mut shards: Vec<Vec<u8>> = vec![Vec::new(); shard_count];

        for (id, &level) in levels.iter().enumerate() {
            if level > max_layer {
                return Err(GraphError::LevelAboveMaxLayer {
                    id: id as VectorId,
                    level,
                    max_layer,
                });
            }
            shards[id % shard_count].push(level);
        }

        Ok(Self {
            shards: shards.into_iter().map(RwLock::new).collect(),
            shard_count,
            len: AtomicUsize::new(levels.len()),
            max_layer: AtomicU8::new(max_layer),
            push_lock: Mutex::new(()),
        })
    }

    /// As [`ShardedGraph::from_levels`], but takes the stripe width from
    /// `config.shard_count` instead of a bare argument — the production
    /// path for wiring [`PrefillConfig`] into a freshly built graph.
    pub fn from_levels_with_config(
        levels: &[u8],
        max_layer: u8,
        config: &PrefillConfig,
    ) -> Result<Self, GraphError> {
        Self::from_levels(levels, max_layer, config.shard_count)
    }

    /// Builds an empty graph with the given stripe width and no declared
    /// maximum layer (`max_layer = 0`).
    pub fn empty(shard_count: usize) -> Result<Self, GraphError> {
        Self::from_levels(&[], 0, shard_count)
    }

    /// Appends a node with the given `level` to the end of the table,
    /// raising `max_layer` if needed.
    ///
    /// This is the one write path in the reference implementation,
    /// standing in for whatever build/insert machinery the real index uses
    /// (out of scope here). Pushes are serialized by `push_lock`: the target
    /// shard's local offset is `id / S`, so two pushes landing in the same
    /// shard must still be appended in `id` order, which a bare per-shard
    /// write lock can't guarantee on its own since the two threads could
    /// acquire it in either order after reserving their ids.
    pub fn push(&self, level: u8) -> VectorId {
        let _guard = self.push_lock.lock();
        let id = self.len.load(Ordering::SeqCst) as VectorId;
        let shard_idx = (id as usize) % self.shard_count;
        self.shards[shard_idx].write().push(level);
        self.len.fetch_add(1, Ordering::SeqCst);
        self.max_layer.fetch_max(level, Ordering::SeqCst);
        id
    }
}

impl GraphView for ShardedGraph {
    fn len(&self) -> usize {
        self.len.load(Ordering::SeqCst)
    }

    fn max_layer(&self) -> u8 {
        self.max_layer.load(Ordering::SeqCst)
    }

    fn level_of(&self, id: VectorId) -> u8 {
        let shard_idx = (id as usize) % self.shard_count;
        let local_idx = (id as usize) / self.shard_count;
        let shard = self.shards[shard_idx].read();
        shard.get(local_idx).copied().unwrap_or(0)
    }

    fn shard_count(&self) -> usize {
        self.shard_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_power_of_two_shard_count() {
        let err = ShardedGraph::from_levels(&[0, 1, 2], 2, 3).unwrap_err();
        assert_eq!(err, GraphError::InvalidShardCount(3));
    }

    #[test]
    fn rejects_a_level_above_the_declared_max_layer() {
        let err = ShardedGraph::from_levels(&[0, 1, 5, 2], 3, 4).unwrap_err();
        assert_eq!(
            err,
            GraphError::LevelAboveMaxLayer {
                id: 2,
                level: 5,
                max_layer: 3,
            }
        );
    }

    #[test]
    fn level_of_matches_source_table() {
        let levels = [3u8, 0, 1, 2, 0, 2, 1, 0, 0, 0, 2, 0, 0, 0, 0, 3];
        let graph = ShardedGraph::from_levels(&levels, 3, 4).unwrap();

        assert_eq!(graph.len(), levels.len());
        assert_eq!(graph.max_layer(), 3);
        for (id, &level) in levels.iter().enumerate() {
            assert_eq!(graph.level_of(id as VectorId), level);
        }
    }

    #[test]
    fn declared_max_layer_need_not_be_occupied_by_any_node() {
        let graph = ShardedGraph::from_levels(&[0, 1, 0, 1], 5, 4).unwrap();
        assert_eq!(graph.max_layer(), 5);
    }

    #[test]
    fn level_of_out_of_range_id_defaults_to_zero() {
        let graph = ShardedGraph::from_levels(&[1, 2], 2, 2).unwrap();
        assert_eq!(graph.level_of(999), 0);
    }

    #[test]
    fn descriptor_pairs_id_with_level_of() {
        let graph = ShardedGraph::from_levels(&[3, 0, 1, 2], 3, 4).unwrap();
        assert_eq!(
            graph.descriptor(2),
            NodeDescriptor { id: 2, level: 1 }
        );
    }

    #[test]
    fn from_levels_with_config_uses_configured_shard_count() {
        let config = PrefillConfig {
            shard_count: 8,
            ..PrefillConfig::default()
        };
        let graph = ShardedGraph::from_levels_with_config(&[0u8; 20], 0, &config).unwrap();
        assert_eq!(graph.shard_count(), 8);
    }

    #[test]
    fn push_grows_the_table_and_tracks_max_layer() {
        let graph = ShardedGraph::empty(8).unwrap();
        assert_eq!(graph.push(0), 0);
        assert_eq!(graph.push(2), 1);
        assert_eq!(graph.push(1), 2);

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.max_layer(), 2);
        assert_eq!(graph.level_of(1), 2);
    }

    #[test]
    fn different_shards_do_not_contend() {
        use std::sync::Arc;
        use std::thread;

        let graph = Arc::new(ShardedGraph::from_levels(&vec![0u8; 256], 0, 16).unwrap());
        let mut handles = Vec::new();
        for t in 0..16u64 {
            let graph = Arc::clone(&graph);
            handles.push(thread::spawn(move || {
                for i in 0..16 {
                    let id = t + (i as u64) * 16;
                    let _ = graph.level_of(id);
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
    }
}
