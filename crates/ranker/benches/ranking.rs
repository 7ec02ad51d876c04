//! Benchmarks for similarity ranking
//!
//! Run with: cargo bench --package ranker
//!
//! Uses a synthetic catalog so the bench needs no data files.

use catalog::{CatalogItem, EmbeddingStore};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ranker::SimilarityRanker;
use std::sync::Arc;

const CATALOG_SIZE: usize = 5_000;
const DIMENSION: usize = 384;

/// Deterministic pseudo-random floats so runs are comparable
fn synthetic_embedding(seed: u64, dimension: usize) -> Vec<f32> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..dimension)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) as f32 / u32::MAX as f32) - 0.5
        })
        .collect()
}

fn build_synthetic_store() -> Arc<EmbeddingStore> {
    let items = (0..CATALOG_SIZE)
        .map(|i| CatalogItem {
            id: i as u32,
            title: format!("Movie {}", i),
            embedding: synthetic_embedding(i as u64, DIMENSION),
        })
        .collect();

    Arc::new(EmbeddingStore::from_items(items).expect("synthetic catalog is uniform"))
}

fn bench_rank_top_5(c: &mut Criterion) {
    let store = build_synthetic_store();
    let ranker = SimilarityRanker::new(store);
    let query = synthetic_embedding(u64::MAX, DIMENSION);

    c.bench_function("rank_top_5", |b| {
        b.iter(|| {
            let ranked = ranker
                .rank(black_box(&query), black_box("Movie 42"), black_box(5))
                .unwrap();
            black_box(ranked)
        })
    });
}

fn bench_rank_top_100(c: &mut Criterion) {
    let store = build_synthetic_store();
    let ranker = SimilarityRanker::new(store);
    let query = synthetic_embedding(u64::MAX, DIMENSION);

    c.bench_function("rank_top_100", |b| {
        b.iter(|| {
            let ranked = ranker
                .rank(black_box(&query), black_box(""), black_box(100))
                .unwrap();
            black_box(ranked)
        })
    });
}

criterion_group!(benches, bench_rank_top_5, bench_rank_top_100);
criterion_main!(benches);
