use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crossbeam_skiplist::SkipMap;
use parking_lot::RwLock;

use crate::{
    column_family::{ColumnFamilyHandle, ColumnFamilyOptions},
    comparator::ComparatorType,
    model::{Column, Row},
    mutation::Mutation,
};

/// Per-kind counts of the mutations applied to one row
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RowApplyStats {
    pub insertions: u64,
    pub column_deletions: u64,
    pub row_deletions: u64,
}

/// Point-in-time summary of a column family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFamilyDescription {
    pub handle: ColumnFamilyHandle,
    pub options: ColumnFamilyOptions,
    /// Rows holding at least one column
    pub live_rows: usize,
    /// Last sequence number handed out
    pub last_sequence: u64,
}

/// Internal data for a Column Family
///
/// Owns every row of the family. Rows live in a lock-free ordered map keyed by
/// row key, each behind its own lock:
///
/// ```text
/// ColumnFamilyData
///  └─→ rows: SkipMap<row key, Arc<RwLock<Row>>>
///       ├─→ "KEY1" → RwLock<Row> { ColumnName1, ColumnName2, ... }
///       └─→ "KEY2" → RwLock<Row> { ... }
/// ```
///
/// # Thread Safety
///
/// - Writers to different rows never contend (no family-wide lock)
/// - All mutations of one batch for one row run under that row's write lock,
///   so readers see the row before or after the batch, never in between
/// - Sequence numbers are drawn while the row lock is held, so the order of
///   sequences matches the order of application within a row
///
/// A row emptied by deletions is marked dead and unlinked from the map while
/// its write lock is held. Only that path removes entries, so a row that is
/// locked and not dead is always the one linked under its key. A writer that
/// locks a dead row looks the key up again.
pub struct ColumnFamilyData {
    /// Column family ID (unique within the keyspace)
    id: u32,

    /// Column family name
    name: String,

    /// Options fixed at creation
    options: ColumnFamilyOptions,

    /// Row key → row
    rows: SkipMap<String, Arc<RwLock<Row>>>,

    /// Last-write-wins tie breaker for equal timestamps
    sequence: AtomicU64,

    /// Reference to this CF as a handle
    handle: ColumnFamilyHandle,
}

impl ColumnFamilyData {
    /// Create a new, empty column family
    pub fn new(id: u32, name: String, options: ColumnFamilyOptions) -> Self {
        let handle = ColumnFamilyHandle::new(id, name.clone());

        ColumnFamilyData {
            id,
            name,
            options,
            rows: SkipMap::new(),
            sequence: AtomicU64::new(0),
            handle,
        }
    }

    /// Get the column family ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the column family name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the column family options
    pub fn options(&self) -> &ColumnFamilyOptions {
        &self.options
    }

    pub fn comparator(&self) -> ComparatorType {
        self.options.comparator
    }

    /// Get a handle to this column family
    pub fn handle(&self) -> &ColumnFamilyHandle {
        &self.handle
    }

    /// Allocate a new sequence number
    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Get current sequence number
    pub fn current_sequence(&self) -> u64 {
        self.sequence.load(Ordering::Relaxed)
    }


    /// Look up the row stored under `key`
    pub fn row(&self, key: &str) -> Option<Arc<RwLock<Row>>> {
        self.rows.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Look up the row stored under `key`, creating an empty one if missing
    pub fn row_or_create(&self, key: &str) -> Arc<RwLock<Row>> {
        if let Some(row) = self.row(key) {
            return row;
        }
        let entry = self
            .rows
            .get_or_insert(key.to_string(), Arc::new(RwLock::new(Row::new())));
        Arc::clone(entry.value())
    }

    /// Run `f` against the row under its read lock
    ///
    /// Returns None when the key has never been written.
    pub fn with_row<T>(&self, key: &str, f: impl FnOnce(&Row) -> T) -> Option<T> {
        let row = self.row(key)?;
        let guard = row.read();
        Some(f(&guard))
    }

    /// Apply mutations addressed to a single row, in order, as one atomic unit
    pub(crate) fn apply_row(&self, row_key: &str, mutations: &[&Mutation]) -> RowApplyStats {
        let has_insert = mutations
            .iter()
            .any(|m| matches!(m, Mutation::Insert { .. }));

        loop {
            // Deleting from a row that was never written is a no-op
            let row = if has_insert {
                self.row_or_create(row_key)
            } else {
                match self.row(row_key) {
                    Some(row) => row,
                    None => return Self::count_only(mutations),
                }
            };

            let mut guard = row.write();
            if guard.is_dead() {
                // Unlinked between lookup and lock
                continue;
            }

            let stats = self.apply_locked(&mut guard, mutations);
            if guard.is_empty() {
                guard.mark_dead();
                self.rows.remove(row_key);
            }
            return stats;
        }
    }

    fn apply_locked(&self, row: &mut Row, mutations: &[&Mutation]) -> RowApplyStats {
        let mut stats = RowApplyStats::default();
        for mutation in mutations {
            let seq = self.next_sequence();
            match mutation {
                Mutation::Insert { column, .. } => {
                    row.insert(column.clone(), seq);
                    stats.insertions += 1;
                },
                Mutation::Delete {
                    column_name: Some(name),
                    timestamp,
                    ..
                } => {
                    row.delete_column(name, *timestamp, seq);
                    stats.column_deletions += 1;
                },
                Mutation::Delete {
                    column_name: None,
                    timestamp,
                    ..
                } => {
                    row.delete_all(*timestamp, seq);
                    stats.row_deletions += 1;
                },
            }
        }
        stats
    }

    fn count_only(mutations: &[&Mutation]) -> RowApplyStats {
        let mut stats = RowApplyStats::default();
        for mutation in mutations {
            match mutation {
                Mutation::Insert { .. } => stats.insertions += 1,
                Mutation::Delete {
                    column_name: Some(_),
                    ..
                } => stats.column_deletions += 1,
                Mutation::Delete {
                    column_name: None, ..
                } => stats.row_deletions += 1,
            }
        }
        stats
    }

    /// Number of rows holding at least one column
    pub fn live_row_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|entry| !entry.value().read().is_empty())
            .count()
    }

    pub fn describe(&self) -> ColumnFamilyDescription {
        ColumnFamilyDescription {
            handle: self.handle.clone(),
            options: self.options.clone(),
            live_rows: self.live_row_count(),
            last_sequence: self.current_sequence(),
        }
    }

    /// Copy of every non-empty row, in row-key order, columns in comparator order
    ///
    /// Each row is captured under its own read lock; the copy is consistent
    /// per row, not across rows.
    pub fn snapshot_rows(&self) -> Vec<(String, Vec<Column>)> {
        let comparator = self.comparator();
        self.rows
            .iter()
            .filter_map(|entry| {
                let row = entry.value().read();
                if row.is_empty() {
                    return None;
                }
                let columns = row
                    .sorted_columns(comparator)
                    .into_iter()
                    .cloned()
                    .collect();
                Some((entry.key().clone(), columns))
            })
            .collect()
    }
}
