use async_trait::async_trait;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use hnsw_prefill::graph::ShardedGraph;
use hnsw_prefill::{prefill, CacheError, PrefillContext, VectorCache, VectorId};
use std::sync::Arc;

struct NullCache {
    capacity: i64,
}

#[async_trait]
impl VectorCache for NullCache {
    async fn load(&self, _ctx: &PrefillContext, _id: VectorId) -> Result<Arc<Vec<f32>>, CacheError> {
        Ok(Arc::new(Vec::new()))
    }

    fn current_capacity(&self) -> i64 {
        self.capacity
    }
}

/// Skewed level assignment similar to a real HNSW graph: most nodes at
/// layer 0, a geometrically shrinking population at each layer above.
fn skewed_levels(n: usize, max_layer: u8) -> Vec<u8> {
    (0..n as u64)
        .map(|i| {
            let mut level = 0u8;
            let mut threshold = 4u64;
            while level < max_layer && i % threshold == 0 {
                level += 1;
                threshold *= 4;
            }
            level
        })
        .collect()
}

fn bench_prefill(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let mut group = c.benchmark_group("prefill");

    for &n in &[10_000usize, 100_000, 1_000_000] {
        let graph = ShardedGraph::from_levels(&skewed_levels(n, 5), 5, 128).unwrap();
        let cache = NullCache { capacity: n as i64 };
        let ctx = PrefillContext::new();

        group.bench_with_input(BenchmarkId::new("full_warmup", n), &n, |b, &limit| {
            b.to_async(&rt)
                .iter(|| prefill(&graph, &cache, &ctx, limit as u64));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prefill);
criterion_main!(benches);
