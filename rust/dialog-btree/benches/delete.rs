use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use dialog_btree::BTree;
use rand::{Rng, SeedableRng, rngs::StdRng};

const BENCH_SEED: u64 = 42;

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);

    for size in [10, 100, 1000, 10000] {
        let keys = (0..size)
            .map(|_| rng.r#gen::<[u8; 16]>())
            .collect::<Vec<_>>();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let mut tree = BTree::<[u8; 16], usize>::new(16).unwrap();

                // Insert all keys
                for (index, key) in keys.iter().enumerate() {
                    tree.put(*key, index);
                }

                // Delete half of them
                for key in keys.iter().take(size / 2) {
                    tree.delete(key);
                }

                tree
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_delete);
criterion_main!(benches);
