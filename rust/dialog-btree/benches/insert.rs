use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dialog_btree::BTree;
use rand::{Rng, SeedableRng, rngs::StdRng};

const BENCH_SEED: u64 = 42;

fn bench_insert_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_sequential");

    for size in [10u32, 100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut tree = BTree::<u32, u32>::new(16).unwrap();

                for key in 0..size {
                    tree.insert(key, key);
                }

                tree
            });
        });
    }

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_random");
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);

    for size in [10, 100, 1000, 10000] {
        let entries = (0..size)
            .map(|_| (rng.r#gen::<[u8; 16]>(), rng.r#gen::<[u8; 32]>()))
            .collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut tree = BTree::<[u8; 16], [u8; 32]>::new(16).unwrap();

                for (key, value) in entries.iter() {
                    tree.put(*key, *value);
                }

                tree
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_insert_sequential, bench_insert_random);
criterion_main!(benches);
