#![no_main]

use std::collections::BTreeMap;

use libfuzzer_sys::fuzz_target;
use widecol::{ColumnFamilyOptions, Keyspace, KeyspaceOptions, Mutator, SliceQuery};

const CF: &str = "Fuzz";
const KEYS: [&str; 4] = ["k0", "k1", "k2", ""];
const NAMES: [&str; 4] = ["c0", "c1", "c2", "c3"];

type Model = BTreeMap<(usize, usize), String>;

fn flush(mutator: &mut Mutator<'_>, model: &mut Model, pending: &mut Model, rejected: &mut bool) {
    let result = mutator.execute();
    if *rejected {
        assert!(result.unwrap_err().is_invalid_argument());
        mutator.discard_pending_mutations();
        *pending = model.clone();
    } else {
        result.unwrap();
        *model = pending.clone();
    }
    *rejected = false;
}

// Fuzz target for mutation batches.
// Each byte triple is one mutation; a 0xFF byte ends the current batch.
// The store must agree with a plain map after every batch, and a rejected
// batch (empty row key) must leave it untouched.
fuzz_target!(|data: &[u8]| {
    let keyspace = Keyspace::open("fuzz", KeyspaceOptions::default()).unwrap();
    keyspace
        .create_column_family(CF, ColumnFamilyOptions::default())
        .unwrap();

    let mut model = Model::new();
    let mut pending = model.clone();
    let mut rejected = false;
    let mut mutator = Mutator::new(&keyspace);

    let mut i = 0;
    while i < data.len() {
        if data[i] == 0xFF {
            flush(&mut mutator, &mut model, &mut pending, &mut rejected);
            i += 1;
            continue;
        }
        if i + 2 >= data.len() {
            break;
        }
        let op = data[i] % 3;
        let k = data[i + 1] as usize % KEYS.len();
        let c = data[i + 2] as usize % NAMES.len();
        i += 3;

        if KEYS[k].is_empty() {
            rejected = true;
        }
        match op {
            0 => {
                let value = format!("v{}", data[i - 1]);
                mutator.add_insertion(KEYS[k], CF, keyspace.create_column(NAMES[c], value.as_str()));
                pending.insert((k, c), value);
            }
            1 => {
                mutator.add_deletion(KEYS[k], CF, Some(NAMES[c]));
                pending.remove(&(k, c));
            }
            _ => {
                mutator.add_deletion(KEYS[k], CF, None);
                pending.retain(|(key, _), _| *key != k);
            }
        }
    }
    flush(&mut mutator, &mut model, &mut pending, &mut rejected);

    for (k, key) in KEYS.iter().enumerate().filter(|(_, key)| !key.is_empty()) {
        let slice = SliceQuery::new(&keyspace)
            .set_column_family(CF)
            .set_key(*key)
            .set_column_names(NAMES)
            .execute()
            .unwrap();
        let expected: Vec<(&str, &str)> = model
            .iter()
            .filter(|((row, _), _)| *row == k)
            .map(|((_, c), v)| (NAMES[*c], v.as_str()))
            .collect();
        let actual: Vec<(&str, &str)> = slice.iter().map(|c| (c.name(), c.value())).collect();
        assert_eq!(actual, expected, "row {key} diverged from model");
    }
});
