use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};

use counting_avl::{OrderedCountingTree, WordCount};

const N: usize = 100_000;

pub fn benchmarks(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (1..=N).map(|_| rng.gen_range(0..N as i32 / 10)).collect();

    c.bench_function("tree_insert", |b| {
        b.iter(|| {
            let mut tree = OrderedCountingTree::new(-1);
            for value in &values {
                tree.insert(*value);
            }
            tree
        })
    });

    let mut tree = OrderedCountingTree::new(-1);
    for value in &values {
        tree.insert(*value);
    }

    c.bench_function("tree_find", |b| {
        b.iter(|| {
            for value in &values {
                black_box(tree.find(value));
            }
        })
    });

    c.bench_function("tree_traverse", |b| {
        b.iter(|| {
            tree.traverse_preorder(|element, count| {
                black_box((element, count));
            })
        })
    });

    c.bench_function("tree_remove", |b| {
        b.iter_batched(
            || tree.clone(),
            |mut tree| {
                for value in &values {
                    tree.remove(value);
                }
                tree
            },
            BatchSize::LargeInput,
        )
    });

    let text: String = values
        .iter()
        .map(|value| format!("word{}, ", value % 1_000))
        .collect();

    c.bench_function("word_count_read", |b| {
        b.iter(|| {
            let mut word_count = WordCount::new();
            black_box(word_count.read(text.as_bytes()).ok());
            word_count
        })
    });
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
