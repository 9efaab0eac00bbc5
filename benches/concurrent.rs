use std::{sync::Arc, thread};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use widecol::{ColumnFamilyOptions, Keyspace, KeyspaceOptions, Mutator, SliceQuery};

const CF: &str = "Standard1";

fn setup_keyspace() -> Arc<Keyspace> {
    let keyspace = Keyspace::open("bench", KeyspaceOptions::default()).unwrap();
    keyspace
        .create_column_family(CF, ColumnFamilyOptions::default())
        .unwrap();
    Arc::new(keyspace)
}

fn bench_concurrent_writes(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_writes");

    for num_threads in [1, 2, 4, 8].iter() {
        group.throughput(Throughput::Elements(*num_threads as u64 * 1000));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{num_threads}_threads")),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let keyspace = setup_keyspace();

                    let mut handles = vec![];
                    for thread_id in 0..num_threads {
                        let keyspace = Arc::clone(&keyspace);
                        let handle = thread::spawn(move || {
                            let mut mutator = Mutator::new(&keyspace);
                            for i in 0..1000 {
                                mutator.add_insertion(
                                    format!("t{thread_id}_key{i:06}"),
                                    CF,
                                    keyspace.create_column("col", "x".repeat(1024)),
                                );
                                mutator.execute().unwrap();
                            }
                        });
                        handles.push(handle);
                    }

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

fn bench_hot_row_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("hot_row");
    group.sample_size(20);

    for num_threads in [1, 4].iter() {
        group.throughput(Throughput::Elements(*num_threads as u64 * 500));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{num_threads}_threads")),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let keyspace = setup_keyspace();

                    let handles: Vec<_> = (0..num_threads)
                        .map(|thread_id| {
                            let keyspace = Arc::clone(&keyspace);
                            thread::spawn(move || {
                                let mut mutator = Mutator::new(&keyspace);
                                for i in 0..500 {
                                    if i % 2 == 0 {
                                        mutator.add_insertion(
                                            "hot",
                                            CF,
                                            keyspace.create_column(
                                                format!("col{thread_id}"),
                                                i.to_string(),
                                            ),
                                        );
                                        mutator.execute().unwrap();
                                    } else {
                                        SliceQuery::new(&keyspace)
                                            .set_column_family(CF)
                                            .set_key("hot")
                                            .set_range(None, None, false, 100)
                                            .execute()
                                            .unwrap();
                                    }
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_concurrent_writes, bench_hot_row_contention);
criterion_main!(benches);
