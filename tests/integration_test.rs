use widecol::{
    ColumnFamilyOptions, ColumnSlice, Keyspace, KeyspaceOptions, Mutator, SliceQuery,
};

const COLUMN_FAMILY: &str = "AColumnFamily";
const COLUMN_NAMES: [&str; 4] = ["ColumnName1", "ColumnName2", "ColumnName3", "ColumnName4"];

fn open_keyspace() -> Keyspace {
    let keyspace = Keyspace::open("keySpaceName", KeyspaceOptions::default()).unwrap();
    keyspace
        .create_column_family(COLUMN_FAMILY, ColumnFamilyOptions::default())
        .unwrap();
    keyspace
}

fn read_row(keyspace: &Keyspace, key: &str) -> ColumnSlice {
    SliceQuery::new(keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key(key)
        .set_column_names(COLUMN_NAMES)
        .execute()
        .unwrap()
}

fn values(slice: &ColumnSlice) -> Vec<&str> {
    COLUMN_NAMES
        .iter()
        .map(|name| slice.column_by_name(name).unwrap().value())
        .collect()
}

fn create_row(keyspace: &Keyspace) {
    let mut mutator = Mutator::new(keyspace);
    for (i, name) in COLUMN_NAMES.iter().enumerate() {
        mutator.add_insertion(
            "KEY1",
            COLUMN_FAMILY,
            keyspace.create_column(*name, format!("StringValue{}", i + 1)),
        );
    }
    mutator.execute().unwrap();
}

#[test]
fn test_create_read_update_delete() {
    let keyspace = open_keyspace();

    // Create
    create_row(&keyspace);

    // Read
    let slice = read_row(&keyspace, "KEY1");
    assert!(!slice.is_empty(), "Could not find created row");
    assert_eq!(
        values(&slice),
        vec!["StringValue1", "StringValue2", "StringValue3", "StringValue4"]
    );

    // Update one column
    let mut mutator = Mutator::new(&keyspace);
    mutator.add_insertion(
        "KEY1",
        COLUMN_FAMILY,
        keyspace.create_column("ColumnName1", "StringValue1Updates"),
    );
    mutator.execute().unwrap();

    let slice = read_row(&keyspace, "KEY1");
    assert_eq!(
        values(&slice),
        vec![
            "StringValue1Updates",
            "StringValue2",
            "StringValue3",
            "StringValue4"
        ]
    );

    // Delete the row
    let mut mutator = Mutator::new(&keyspace);
    mutator.add_deletion("KEY1", COLUMN_FAMILY, None);
    mutator.execute().unwrap();

    let slice = read_row(&keyspace, "KEY1");
    assert!(slice.is_empty(), "Could find deleted row");
}

#[test]
fn test_slice_follows_requested_order() {
    let keyspace = open_keyspace();
    create_row(&keyspace);

    let slice = SliceQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("KEY1")
        .set_column_names(["ColumnName4", "Missing", "ColumnName2"])
        .execute()
        .unwrap();

    let names: Vec<&str> = slice.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["ColumnName4", "ColumnName2"]);
}

#[test]
fn test_unknown_key_is_empty_slice() {
    let keyspace = open_keyspace();
    create_row(&keyspace);

    assert!(read_row(&keyspace, "NOPE").is_empty());
}

#[test]
fn test_delete_single_column() {
    let keyspace = open_keyspace();
    create_row(&keyspace);

    let mut mutator = Mutator::new(&keyspace);
    mutator.add_deletion("KEY1", COLUMN_FAMILY, Some("ColumnName2"));
    mutator.execute().unwrap();

    let slice = read_row(&keyspace, "KEY1");
    assert_eq!(slice.len(), 3);
    assert!(slice.column_by_name("ColumnName2").is_none());
    assert_eq!(
        slice.column_by_name("ColumnName3").unwrap().value(),
        "StringValue3"
    );

    // Deleting a column that is not there is a no-op
    let mut mutator = Mutator::new(&keyspace);
    mutator.add_deletion("KEY1", COLUMN_FAMILY, Some("ColumnName2"));
    mutator.execute().unwrap();
    assert_eq!(read_row(&keyspace, "KEY1").len(), 3);
}

#[test]
fn test_row_absent_after_last_column_removed_then_repopulated() {
    let keyspace = open_keyspace();

    let mut mutator = Mutator::new(&keyspace);
    mutator.add_insertion("KEY1", COLUMN_FAMILY, keyspace.create_column("ColumnName1", "a"));
    mutator.execute().unwrap();

    mutator.add_deletion("KEY1", COLUMN_FAMILY, Some("ColumnName1"));
    mutator.execute().unwrap();
    assert!(read_row(&keyspace, "KEY1").is_empty());

    mutator.add_insertion("KEY1", COLUMN_FAMILY, keyspace.create_column("ColumnName3", "b"));
    mutator.execute().unwrap();

    let slice = read_row(&keyspace, "KEY1");
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.column_by_name("ColumnName3").unwrap().value(), "b");
}

#[test]
fn test_later_insertion_in_same_batch_wins() {
    let keyspace = open_keyspace();

    // Same timestamp on purpose: the insertion added last must still win
    let mut mutator = Mutator::new(&keyspace);
    let ts = keyspace.create_clock();
    mutator
        .add_insertion("KEY1", COLUMN_FAMILY, widecol::Column::new("ColumnName1", "first", ts))
        .add_insertion("KEY1", COLUMN_FAMILY, widecol::Column::new("ColumnName1", "second", ts));
    mutator.execute().unwrap();

    let slice = read_row(&keyspace, "KEY1");
    assert_eq!(slice.len(), 1);
    assert_eq!(slice.column_by_name("ColumnName1").unwrap().value(), "second");
}

#[test]
fn test_mixed_keys_and_families_in_one_batch() {
    let keyspace = open_keyspace();
    keyspace
        .create_column_family("Other", ColumnFamilyOptions::default())
        .unwrap();

    let mut mutator = Mutator::new(&keyspace);
    mutator
        .add_insertion("KEY1", COLUMN_FAMILY, keyspace.create_column("ColumnName1", "a"))
        .add_insertion("KEY2", COLUMN_FAMILY, keyspace.create_column("ColumnName1", "b"))
        .add_insertion("KEY1", "Other", keyspace.create_column("ColumnName1", "c"));
    let result = mutator.execute().unwrap();
    assert_eq!(result.mutations, 3);
    assert_eq!(result.rows, 3);

    let get = |cf: &str, key: &str| {
        keyspace
            .get_column(cf, key, "ColumnName1")
            .unwrap()
            .map(|c| c.value().to_string())
    };
    assert_eq!(get(COLUMN_FAMILY, "KEY1").as_deref(), Some("a"));
    assert_eq!(get(COLUMN_FAMILY, "KEY2").as_deref(), Some("b"));
    assert_eq!(get("Other", "KEY1").as_deref(), Some("c"));
}

#[test]
fn test_errors_are_distinguishable() {
    let keyspace = open_keyspace();

    let err = keyspace
        .create_column_family(COLUMN_FAMILY, ColumnFamilyOptions::default())
        .unwrap_err();
    assert!(err.is_already_exists());

    let mut mutator = Mutator::new(&keyspace);
    mutator.add_insertion("KEY1", "Nope", keyspace.create_column("a", "b"));
    let err = mutator.execute().unwrap_err();
    assert!(err.is_invalid_column_family());
    assert!(!err.is_retryable());

    let err = SliceQuery::new(&keyspace)
        .set_column_family("Nope")
        .set_key("KEY1")
        .execute()
        .unwrap_err();
    assert!(err.is_invalid_column_family());

    let err = SliceQuery::new(&keyspace).set_key("KEY1").execute().unwrap_err();
    assert!(err.is_invalid_argument());

    keyspace.close();
    mutator.discard_pending_mutations();
    mutator.add_insertion("KEY1", COLUMN_FAMILY, keyspace.create_column("a", "b"));
    let err = mutator.execute().unwrap_err();
    assert!(err.is_store_unavailable());
    assert!(err.is_retryable());
}

#[test]
fn test_range_slice_in_comparator_order() {
    let keyspace = open_keyspace();
    create_row(&keyspace);

    let slice = SliceQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("KEY1")
        .set_range(Some("ColumnName2"), None, false, 2)
        .execute()
        .unwrap();
    let names: Vec<&str> = slice.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["ColumnName2", "ColumnName3"]);

    let slice = SliceQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("KEY1")
        .set_range(None, None, true, 100)
        .execute()
        .unwrap();
    let names: Vec<&str> = slice.iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec!["ColumnName4", "ColumnName3", "ColumnName2", "ColumnName1"]
    );
}

#[test]
fn test_column_and_count_queries() {
    let keyspace = open_keyspace();
    create_row(&keyspace);

    let column = widecol::ColumnQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("KEY1")
        .set_name("ColumnName3")
        .execute()
        .unwrap()
        .unwrap();
    assert_eq!(column.value(), "StringValue3");

    let count = widecol::CountQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("KEY1")
        .execute()
        .unwrap();
    assert_eq!(count, 4);

    let count = widecol::CountQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("KEY1")
        .set_range(Some("ColumnName2"), Some("ColumnName3"), 100)
        .execute()
        .unwrap();
    assert_eq!(count, 2);

    let count = widecol::CountQuery::new(&keyspace)
        .set_column_family(COLUMN_FAMILY)
        .set_key("MISSING")
        .execute()
        .unwrap();
    assert_eq!(count, 0);
}
