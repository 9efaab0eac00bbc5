use std::collections::HashMap;

use crate::{comparator::ComparatorType, model::Column};

/// A stored column plus the sequence number of the write that produced it
#[derive(Debug, Clone)]
struct Cell {
    column: Column,
    sequence: u64,
}

impl Cell {
    /// Last-write-wins version: timestamp first, sequence breaks ties
    #[inline]
    fn version(&self) -> (i64, u64) {
        (self.column.timestamp(), self.sequence)
    }
}

/// The columns stored under one row key of a column family
///
/// A row with no columns is absent: it is indistinguishable from a key that was
/// never written. Deletions leave no tombstone behind.
#[derive(Debug, Default)]
pub struct Row {
    cells: HashMap<String, Cell>,
    /// Set once the row has been unlinked from its column family
    dead: bool,
}

impl Row {
    pub fn new() -> Self {
        Row::default()
    }

    /// Store `column` unless the current cell of that name is newer
    ///
    /// Returns true if the column was written.
    pub fn insert(&mut self, column: Column, sequence: u64) -> bool {
        let version = (column.timestamp(), sequence);
        match self.cells.get_mut(column.name()) {
            Some(cell) if cell.version() > version => false,
            Some(cell) => {
                *cell = Cell { column, sequence };
                true
            },
            None => {
                self.cells
                    .insert(column.name().to_string(), Cell { column, sequence });
                true
            },
        }
    }

    /// Remove the named column if it is not newer than the deletion
    pub fn delete_column(&mut self, name: &str, timestamp: i64, sequence: u64) -> bool {
        match self.cells.get(name) {
            Some(cell) if cell.version() <= (timestamp, sequence) => {
                self.cells.remove(name);
                true
            },
            _ => false,
        }
    }

    /// Remove every column not newer than the deletion; returns how many went
    pub fn delete_all(&mut self, timestamp: i64, sequence: u64) -> usize {
        let before = self.cells.len();
        self.cells
            .retain(|_, cell| cell.version() > (timestamp, sequence));
        before - self.cells.len()
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.cells.get(name).map(|cell| &cell.column)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the row was emptied and unlinked; a dead row accepts no writes
    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub(crate) fn mark_dead(&mut self) {
        debug_assert!(self.cells.is_empty());
        self.dead = true;
    }

    /// All columns in comparator order
    pub fn sorted_columns(&self, comparator: ComparatorType) -> Vec<&Column> {
        let mut columns: Vec<&Column> = self.cells.values().map(|cell| &cell.column).collect();
        columns.sort_by(|a, b| comparator.compare(a.name(), b.name()));
        columns
    }
}
