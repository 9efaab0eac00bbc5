use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use widecol::{ColumnFamilyOptions, Keyspace, KeyspaceOptions, Mutator, SliceQuery};

const CF: &str = "Standard1";

fn setup_keyspace() -> Keyspace {
    let keyspace = Keyspace::open("bench", KeyspaceOptions::default()).unwrap();
    keyspace
        .create_column_family(CF, ColumnFamilyOptions::default())
        .unwrap();
    keyspace
}

fn populate(keyspace: &Keyspace, rows: usize, columns: usize) {
    let mut mutator = Mutator::new(keyspace);
    for r in 0..rows {
        for c in 0..columns {
            mutator.add_insertion(
                format!("key{r:06}"),
                CF,
                keyspace.create_column(format!("col{c:03}"), "x".repeat(100)),
            );
        }
        mutator.execute().unwrap();
    }
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    group.throughput(Throughput::Elements(1));

    // One column per batch
    group.bench_function("single_column", |b| {
        let keyspace = setup_keyspace();
        let mut mutator = Mutator::new(&keyspace);
        let mut i = 0u64;
        b.iter(|| {
            mutator.add_insertion(
                format!("key{i:010}"),
                CF,
                keyspace.create_column("col", "x".repeat(100)),
            );
            mutator.execute().unwrap();
            i += 1;
        });
    });

    // A whole row of 16 columns per batch
    group.bench_function("row_of_16", |b| {
        let keyspace = setup_keyspace();
        let mut mutator = Mutator::new(&keyspace);
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("key{i:010}");
            for c in 0..16 {
                mutator.add_insertion(
                    key.as_str(),
                    CF,
                    keyspace.create_column(format!("col{c:03}"), "x".repeat(100)),
                );
            }
            mutator.execute().unwrap();
            i += 1;
        });
    });

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");
    group.throughput(Throughput::Elements(1));

    let keyspace = setup_keyspace();
    populate(&keyspace, 1000, 32);

    group.bench_function("by_names_4", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let slice = SliceQuery::new(&keyspace)
                .set_column_family(CF)
                .set_key(format!("key{:06}", i % 1000))
                .set_column_names(["col000", "col008", "col016", "col024"])
                .execute()
                .unwrap();
            black_box(slice);
            i += 1;
        });
    });

    group.bench_function("range_10", |b| {
        let mut i = 0usize;
        b.iter(|| {
            let slice = SliceQuery::new(&keyspace)
                .set_column_family(CF)
                .set_key(format!("key{:06}", i % 1000))
                .set_range(Some("col010"), None, false, 10)
                .execute()
                .unwrap();
            black_box(slice);
            i += 1;
        });
    });

    group.bench_function("missing_row", |b| {
        b.iter(|| {
            let slice = SliceQuery::new(&keyspace)
                .set_column_family(CF)
                .set_key("absent")
                .set_column_names(["col000"])
                .execute()
                .unwrap();
            black_box(slice);
        });
    });

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");
    group.throughput(Throughput::Elements(1));

    group.bench_function("delete_row", |b| {
        let keyspace = setup_keyspace();
        populate(&keyspace, 1000, 8);
        let mut mutator = Mutator::new(&keyspace);
        let mut i = 0usize;
        b.iter(|| {
            mutator.add_deletion(format!("key{:06}", i % 1000), CF, None);
            mutator.execute().unwrap();
            i += 1;
        });
    });

    group.finish();
}

fn bench_mixed_workload(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");

    // 80% reads, 20% writes
    group.bench_function("read_heavy", |b| {
        let keyspace = setup_keyspace();
        populate(&keyspace, 1000, 4);
        let mut mutator = Mutator::new(&keyspace);
        let mut i = 0usize;
        b.iter(|| {
            let key = format!("key{:06}", i % 1000);
            if i % 5 == 0 {
                mutator.add_insertion(key, CF, keyspace.create_column("col000", "updated"));
                mutator.execute().unwrap();
            } else {
                black_box(keyspace.get_column(CF, &key, "col000").unwrap());
            }
            i += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_slice,
    bench_delete,
    bench_mixed_workload
);
criterion_main!(benches);
