use tracing_subscriber::EnvFilter;
use widecol::{ColumnFamilyOptions, Keyspace, KeyspaceOptions, Mutator, SliceQuery};

const COLUMNS: [&str; 4] = ["ColumnName1", "ColumnName2", "ColumnName3", "ColumnName4"];

fn print_row(keyspace: &Keyspace, key: &str) {
    let slice = SliceQuery::new(keyspace)
        .set_column_family("AColumnFamily")
        .set_key(key)
        .set_column_names(COLUMNS)
        .execute()
        .expect("Failed to query");

    if slice.is_empty() {
        println!("{key}: <no row>");
        return;
    }
    for column in &slice {
        println!("{key}: {} = {}", column.name(), column.value());
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("widecol Simple Example");

    let keyspace =
        Keyspace::open("keySpaceName", KeyspaceOptions::default()).expect("Failed to open keyspace");
    keyspace
        .create_column_family("AColumnFamily", ColumnFamilyOptions::default())
        .expect("Failed to create column family");

    let mut mutator = Mutator::new(&keyspace);
    for (i, name) in COLUMNS.iter().enumerate() {
        mutator.add_insertion(
            "KEY1",
            "AColumnFamily",
            keyspace.create_column(*name, format!("StringValue{}", i + 1)),
        );
    }
    mutator.execute().expect("Failed to insert");
    print_row(&keyspace, "KEY1");

    mutator.add_insertion(
        "KEY1",
        "AColumnFamily",
        keyspace.create_column("ColumnName1", "StringValue1Updates"),
    );
    mutator.execute().expect("Failed to update");
    println!("After update:");
    print_row(&keyspace, "KEY1");

    mutator.add_deletion("KEY1", "AColumnFamily", None);
    mutator.execute().expect("Failed to delete");
    println!("After delete:");
    print_row(&keyspace, "KEY1");

    println!("{}", keyspace.statistics().report());
    keyspace.close();
    println!("Keyspace closed successfully");
}
