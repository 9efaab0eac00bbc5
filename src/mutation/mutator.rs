use crate::{
    keyspace::Keyspace,
    model::Column,
    mutation::MutationBatch,
    util::Result,
};

/// Outcome of a successfully applied batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationResult {
    /// Number of mutations applied
    pub mutations: usize,
    /// Number of distinct (column family, row key) pairs touched
    pub rows: usize,
    /// Wall time spent applying the batch
    pub execution_time_micros: u64,
}

/// Builder that accumulates mutations and submits them to a keyspace
///
/// The mutator borrows the keyspace it writes to; nothing is global. Pending
/// mutations are discarded once `execute` succeeds. When `execute` fails they
/// are kept, so a `StoreUnavailable` can be retried as is.
///
/// ```ignore
/// let mut mutator = Mutator::new(&keyspace);
/// mutator
///     .add_insertion("KEY1", "AColumnFamily", keyspace.create_column("ColumnName1", "StringValue1"))
///     .add_insertion("KEY1", "AColumnFamily", keyspace.create_column("ColumnName2", "StringValue2"));
/// mutator.execute()?;
/// ```
pub struct Mutator<'a> {
    keyspace: &'a Keyspace,
    batch: MutationBatch,
}

impl<'a> Mutator<'a> {
    pub fn new(keyspace: &'a Keyspace) -> Self {
        Mutator {
            keyspace,
            batch: MutationBatch::new(),
        }
    }

    /// Queue an insertion of `column` into `row_key`
    pub fn add_insertion(
        &mut self,
        row_key: impl Into<String>,
        column_family: impl AsRef<str>,
        column: Column,
    ) -> &mut Self {
        self.batch
            .add_insertion(row_key, column_family.as_ref(), column);
        self
    }

    /// Queue a deletion stamped with the keyspace clock
    ///
    /// `column_name == None` deletes every column of the row.
    pub fn add_deletion(
        &mut self,
        row_key: impl Into<String>,
        column_family: impl AsRef<str>,
        column_name: Option<&str>,
    ) -> &mut Self {
        let timestamp = self.keyspace.create_clock();
        self.add_deletion_at(row_key, column_family, column_name, timestamp)
    }

    /// Queue a deletion with an explicit timestamp
    pub fn add_deletion_at(
        &mut self,
        row_key: impl Into<String>,
        column_family: impl AsRef<str>,
        column_name: Option<&str>,
        timestamp: i64,
    ) -> &mut Self {
        self.batch.add_deletion(
            row_key,
            column_family.as_ref(),
            column_name.map(str::to_string),
            timestamp,
        );
        self
    }

    /// Apply all pending mutations
    pub fn execute(&mut self) -> Result<MutationResult> {
        let result = self.keyspace.apply(&self.batch)?;
        self.batch.clear();
        Ok(result)
    }

    /// Apply a single insertion right away, leaving pending mutations alone
    pub fn insert(
        &self,
        row_key: impl Into<String>,
        column_family: impl AsRef<str>,
        column: Column,
    ) -> Result<MutationResult> {
        let mut batch = MutationBatch::with_capacity(1);
        batch.add_insertion(row_key, column_family.as_ref(), column);
        self.keyspace.apply(&batch)
    }

    /// Apply a single deletion right away, leaving pending mutations alone
    pub fn delete(
        &self,
        row_key: impl Into<String>,
        column_family: impl AsRef<str>,
        column_name: Option<&str>,
    ) -> Result<MutationResult> {
        let mut batch = MutationBatch::with_capacity(1);
        batch.add_deletion(
            row_key,
            column_family.as_ref(),
            column_name.map(str::to_string),
            self.keyspace.create_clock(),
        );
        self.keyspace.apply(&batch)
    }

    pub fn pending_mutation_count(&self) -> usize {
        self.batch.count()
    }

    pub fn discard_pending_mutations(&mut self) {
        self.batch.clear();
    }

    /// The pending batch
    pub fn batch(&self) -> &MutationBatch {
        &self.batch
    }
}
