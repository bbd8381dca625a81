use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use bulk_btree::{BTree, Config};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys.sort_unstable();
    keys.dedup();
    // Shuffle back out of order with a second LCG pass.
    for i in (1..keys.len()).rev() {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.swap(i, (x >> 33) as usize % (i + 1));
    }
    keys
}

fn config() -> Config {
    Config::new(32, 8)
}

// ─── Bulk load ──────────────────────────────────────────────────────────────

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for (name, keys) in [("ordered", ordered_keys(N)), ("random", random_keys(N))] {
        group.bench_function(BenchmarkId::new(format!("BTree/{name}"), N), |b| {
            b.iter(|| BTree::build(keys.iter().map(|&k| (k, k)), config()).unwrap());
        });

        group.bench_function(BenchmarkId::new(format!("BTreeMap/{name}"), N), |b| {
            b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<_, _>>());
        });
    }

    group.finish();
}

// ─── Insert on top of a bulk-loaded tree ────────────────────────────────────

fn bench_insert_after_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_after_build");
    let evens: Vec<i64> = ordered_keys(N).into_iter().map(|k| k * 2).collect();
    let odds: Vec<i64> = ordered_keys(N).into_iter().map(|k| k * 2 + 1).collect();

    for slack in [0, 8, 16] {
        group.bench_function(BenchmarkId::new("slack", slack), |b| {
            b.iter_batched(
                || BTree::build(evens.iter().map(|&k| (k, k)), Config::new(32, slack)).unwrap(),
                |mut tree| {
                    for &k in &odds {
                        tree.insert(k, k);
                    }
                    tree
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_random");
    let keys = random_keys(N);
    let tree = BTree::build(keys.iter().map(|&k| (k, k)), config()).unwrap();
    let map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    group.bench_function(BenchmarkId::new("BTree", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(tree.get(k));
            }
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            for k in &keys {
                black_box(map.get(k));
            }
        });
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(build_benches, bench_build, bench_insert_after_build);

criterion_group!(get_benches, bench_get);

criterion_main!(build_benches, get_benches);
