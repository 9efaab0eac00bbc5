use std::sync::atomic::{AtomicU64, Ordering};

/// Keyspace-wide statistics
///
/// Thread-safe statistics tracking for all keyspace operations.
/// Uses atomic counters for lock-free updates.
#[derive(Debug, Default)]
pub struct Statistics {
    // Write path
    pub num_batches: AtomicU64,
    pub num_insertions: AtomicU64,
    pub num_column_deletions: AtomicU64,
    pub num_row_deletions: AtomicU64,
    pub rows_mutated: AtomicU64,
    pub bytes_written: AtomicU64,

    // Read path
    pub num_slice_queries: AtomicU64,
    pub num_empty_slices: AtomicU64,
    pub columns_read: AtomicU64,
    pub bytes_read: AtomicU64,

    // Schema
    pub column_families_created: AtomicU64,
    pub column_families_dropped: AtomicU64,

    // Error counts
    pub num_errors: AtomicU64,
}

impl Statistics {
    pub fn new() -> Self {
        Statistics::default()
    }

    // Write tracking
    #[inline]
    pub fn record_batch(&self, rows: u64, bytes: u64) {
        self.num_batches.fetch_add(1, Ordering::Relaxed);
        self.rows_mutated.fetch_add(rows, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_mutations(&self, insertions: u64, column_deletions: u64, row_deletions: u64) {
        self.num_insertions.fetch_add(insertions, Ordering::Relaxed);
        self.num_column_deletions
            .fetch_add(column_deletions, Ordering::Relaxed);
        self.num_row_deletions
            .fetch_add(row_deletions, Ordering::Relaxed);
    }

    // Read tracking
    #[inline]
    pub fn record_slice(&self, columns: u64, bytes: u64) {
        self.num_slice_queries.fetch_add(1, Ordering::Relaxed);
        self.columns_read.fetch_add(columns, Ordering::Relaxed);
        self.bytes_read.fetch_add(bytes, Ordering::Relaxed);
        if columns == 0 {
            self.num_empty_slices.fetch_add(1, Ordering::Relaxed);
        }
    }

    // Schema tracking
    #[inline]
    pub fn record_column_family_created(&self) {
        self.column_families_created
            .fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_column_family_dropped(&self) {
        self.column_families_dropped
            .fetch_add(1, Ordering::Relaxed);
    }

    // Error tracking
    #[inline]
    pub fn record_error(&self) {
        self.num_errors.fetch_add(1, Ordering::Relaxed);
    }

    // Getters (snapshot values)
    pub fn num_batches(&self) -> u64 {
        self.num_batches.load(Ordering::Relaxed)
    }

    pub fn num_insertions(&self) -> u64 {
        self.num_insertions.load(Ordering::Relaxed)
    }

    pub fn num_column_deletions(&self) -> u64 {
        self.num_column_deletions.load(Ordering::Relaxed)
    }

    pub fn num_row_deletions(&self) -> u64 {
        self.num_row_deletions.load(Ordering::Relaxed)
    }

    pub fn num_slice_queries(&self) -> u64 {
        self.num_slice_queries.load(Ordering::Relaxed)
    }

    pub fn columns_read(&self) -> u64 {
        self.columns_read.load(Ordering::Relaxed)
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read.load(Ordering::Relaxed)
    }

    pub fn num_errors(&self) -> u64 {
        self.num_errors.load(Ordering::Relaxed)
    }

    /// Fraction of slice queries that found no columns
    pub fn empty_slice_rate(&self) -> f64 {
        let empty = self.num_empty_slices.load(Ordering::Relaxed) as f64;
        let total = self.num_slice_queries.load(Ordering::Relaxed) as f64;
        if total > 0.0 { empty / total } else { 0.0 }
    }

    pub fn avg_mutations_per_batch(&self) -> f64 {
        let mutations = (self.num_insertions.load(Ordering::Relaxed)
            + self.num_column_deletions.load(Ordering::Relaxed)
            + self.num_row_deletions.load(Ordering::Relaxed)) as f64;
        let batches = self.num_batches.load(Ordering::Relaxed) as f64;
        if batches > 0.0 { mutations / batches } else { 0.0 }
    }

    /// Reset all statistics to zero
    pub fn reset(&self) {
        self.num_batches.store(0, Ordering::Relaxed);
        self.num_insertions.store(0, Ordering::Relaxed);
        self.num_column_deletions.store(0, Ordering::Relaxed);
        self.num_row_deletions.store(0, Ordering::Relaxed);
        self.rows_mutated.store(0, Ordering::Relaxed);
        self.bytes_written.store(0, Ordering::Relaxed);
        self.num_slice_queries.store(0, Ordering::Relaxed);
        self.num_empty_slices.store(0, Ordering::Relaxed);
        self.columns_read.store(0, Ordering::Relaxed);
        self.bytes_read.store(0, Ordering::Relaxed);
        self.column_families_created.store(0, Ordering::Relaxed);
        self.column_families_dropped.store(0, Ordering::Relaxed);
        self.num_errors.store(0, Ordering::Relaxed);
    }

    /// Get a formatted statistics report
    pub fn report(&self) -> String {
        format!(
            "Keyspace Statistics:\n\
            \n\
            Writes:\n\
            \x20 Batches:       {}\n\
            \x20 Insertions:    {}\n\
            \x20 Col deletes:   {}\n\
            \x20 Row deletes:   {}\n\
            \x20 Rows mutated:  {}\n\
            \x20 Bytes written: {}\n\
            \n\
            Reads:\n\
            \x20 Slices:        {}\n\
            \x20 Columns read:  {}\n\
            \x20 Bytes read:    {}\n\
            \x20 Empty rate:    {:.2}%\n\
            \n\
            Schema:\n\
            \x20 CFs created:   {}\n\
            \x20 CFs dropped:   {}\n\
            \n\
            Errors:           {}\n",
            self.num_batches(),
            self.num_insertions(),
            self.num_column_deletions(),
            self.num_row_deletions(),
            self.rows_mutated.load(Ordering::Relaxed),
            self.bytes_written(),
            self.num_slice_queries(),
            self.columns_read(),
            self.bytes_read(),
            self.empty_slice_rate() * 100.0,
            self.column_families_created.load(Ordering::Relaxed),
            self.column_families_dropped.load(Ordering::Relaxed),
            self.num_errors(),
        )
    }
}
