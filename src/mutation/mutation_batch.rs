use std::collections::HashMap;

use crate::model::Column;

/// A single write addressed to one row of one column family
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set (or overwrite) a column
    Insert {
        row_key: String,
        column_family: String,
        column: Column,
    },
    /// Remove a column, or the whole row when `column_name` is None
    Delete {
        row_key: String,
        column_family: String,
        column_name: Option<String>,
        timestamp: i64,
    },
}

impl Mutation {
    pub fn row_key(&self) -> &str {
        match self {
            Mutation::Insert { row_key, .. } | Mutation::Delete { row_key, .. } => row_key,
        }
    }

    pub fn column_family(&self) -> &str {
        match self {
            Mutation::Insert { column_family, .. } | Mutation::Delete { column_family, .. } => {
                column_family
            },
        }
    }

    /// Name of the column touched; None for a whole-row deletion
    pub fn column_name(&self) -> Option<&str> {
        match self {
            Mutation::Insert { column, .. } => Some(column.name()),
            Mutation::Delete { column_name, .. } => column_name.as_deref(),
        }
    }

    /// Write timestamp of the insertion or deletion
    pub fn timestamp(&self) -> i64 {
        match self {
            Mutation::Insert { column, .. } => column.timestamp(),
            Mutation::Delete { timestamp, .. } => *timestamp,
        }
    }

    fn size(&self) -> usize {
        match self {
            Mutation::Insert {
                row_key, column, ..
            } => row_key.len() + column.size(),
            Mutation::Delete {
                row_key,
                column_name,
                ..
            } => row_key.len() + column_name.as_ref().map_or(0, String::len),
        }
    }
}

/// Mutations of one batch that address the same (column family, row key)
#[derive(Debug, Clone)]
struct RowGroup {
    column_family: String,
    row_key: String,
    mutations: Vec<usize>,
}

/// MutationBatch accumulates insertions and deletions for atomic execution
///
/// Mutations are kept in insertion order and indexed by the row they address.
/// A row is the unit of atomicity: every mutation for one row is applied
/// together, in the order it was added. Different rows of one batch are
/// independent units.
#[derive(Debug, Clone, Default)]
pub struct MutationBatch {
    /// Mutations in insertion order
    mutations: Vec<Mutation>,
    /// Row groups in order of first appearance
    groups: Vec<RowGroup>,
    /// (cf, row key) -> position in `groups`
    index: HashMap<(String, String), usize>,
    /// Approximate memory usage in bytes
    data_size: usize,
}

impl MutationBatch {
    /// Create a new empty MutationBatch
    #[inline]
    pub fn new() -> Self {
        MutationBatch::default()
    }

    /// Create MutationBatch with reserved capacity
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        MutationBatch {
            mutations: Vec::with_capacity(capacity),
            ..Default::default()
        }
    }

    /// Append an insertion of `column` into `row_key` of `column_family`
    pub fn add_insertion(
        &mut self,
        row_key: impl Into<String>,
        column_family: impl Into<String>,
        column: Column,
    ) {
        self.push(Mutation::Insert {
            row_key: row_key.into(),
            column_family: column_family.into(),
            column,
        });
    }

    /// Append a deletion; `column_name == None` deletes the whole row
    pub fn add_deletion(
        &mut self,
        row_key: impl Into<String>,
        column_family: impl Into<String>,
        column_name: Option<String>,
        timestamp: i64,
    ) {
        self.push(Mutation::Delete {
            row_key: row_key.into(),
            column_family: column_family.into(),
            column_name,
            timestamp,
        });
    }

    /// Append an already-built mutation
    pub fn push(&mut self, mutation: Mutation) {
        self.data_size += mutation.size();

        let group_key = (
            mutation.column_family().to_string(),
            mutation.row_key().to_string(),
        );
        let position = self.mutations.len();
        match self.index.get(&group_key) {
            Some(&g) => self.groups[g].mutations.push(position),
            None => {
                self.index.insert(group_key.clone(), self.groups.len());
                self.groups.push(RowGroup {
                    column_family: group_key.0,
                    row_key: group_key.1,
                    mutations: vec![position],
                });
            },
        }
        self.mutations.push(mutation);
    }

    /// Mutations grouped per (column family, row key), in insertion order
    pub fn row_groups(&self) -> impl Iterator<Item = (&str, &str, Vec<&Mutation>)> + '_ {
        self.groups.iter().map(move |group| {
            let mutations = group.mutations.iter().map(|&i| &self.mutations[i]).collect();
            (
                group.column_family.as_str(),
                group.row_key.as_str(),
                mutations,
            )
        })
    }

    /// Latest pending mutation touching the given column of a row
    ///
    /// A whole-row deletion touches every column.
    pub fn get_for_update(&self, column_family: &str, row_key: &str, name: &str) -> Option<&Mutation> {
        let &g = self
            .index
            .get(&(column_family.to_string(), row_key.to_string()))?;
        self.groups[g]
            .mutations
            .iter()
            .rev()
            .map(|&i| &self.mutations[i])
            .find(|m| m.column_name().is_none_or(|n| n == name))
    }

    /// Get all mutations
    #[inline]
    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    /// Number of mutations in the batch
    #[inline]
    pub fn count(&self) -> usize {
        self.mutations.len()
    }

    /// Number of distinct rows addressed
    #[inline]
    pub fn row_count(&self) -> usize {
        self.groups.len()
    }

    /// Clear all mutations
    pub fn clear(&mut self) {
        self.mutations.clear();
        self.groups.clear();
        self.index.clear();
        self.data_size = 0;
    }

    /// Approximate memory usage in bytes
    #[inline]
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Check if batch is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}
