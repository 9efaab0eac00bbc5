use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::{
    clock::{Clock, ClockResolution},
    column_family::{
        ColumnFamilyData, ColumnFamilyDescription, ColumnFamilyHandle, ColumnFamilyOptions,
        ColumnFamilySet, RowApplyStats,
    },
    comparator::ComparatorType,
    model::{Column, Row},
    mutation::{Mutation, MutationBatch, MutationResult},
    query::{ColumnSlice, SlicePredicate, SliceQuery},
    statistics::Statistics,
    util::{Result, Status, validate_name},
};

/// Upper bound on mutations per batch unless configured otherwise
pub const DEFAULT_MAX_BATCH_SIZE: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyspaceOptions {
    pub clock_resolution: ClockResolution, // Unit of generated write timestamps
    pub max_batch_size: usize,             // Larger batches are rejected whole
}

impl Default for KeyspaceOptions {
    fn default() -> Self {
        KeyspaceOptions {
            clock_resolution: ClockResolution::Microseconds,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}

/// A keyspace: the store that owns column families and their rows
///
/// Every mutation batch and query is dispatched here. Callers construct the
/// keyspace once and hand references to [`Mutator`](crate::Mutator) and
/// [`SliceQuery`](crate::SliceQuery) builders.
///
/// After [`close`](Keyspace::close) every operation fails with
/// `StoreUnavailable`, the retryable error class.
pub struct Keyspace {
    /// Keyspace name
    name: String,
    /// Options fixed at open
    options: KeyspaceOptions,
    /// Manages all column families
    column_families: ColumnFamilySet,
    /// Source of write timestamps
    clock: Clock,
    /// Keyspace-wide statistics
    statistics: Arc<Statistics>,
    /// Cleared by `close`
    open: AtomicBool,
}

impl fmt::Debug for Keyspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyspace")
            .field("name", &self.name)
            .field("options", &self.options)
            .field("column_families", &self.list_column_families())
            .field("open", &self.is_open())
            .finish_non_exhaustive()
    }
}

impl Keyspace {
    pub fn open(name: &str, options: KeyspaceOptions) -> Result<Self> {
        validate_name("keyspace", name)?;
        if options.max_batch_size == 0 {
            return Err(Status::invalid_argument("max_batch_size must be positive"));
        }

        info!(keyspace = name, ?options, "opening keyspace");

        Ok(Keyspace {
            name: name.to_string(),
            clock: Clock::new(options.clock_resolution),
            options,
            column_families: ColumnFamilySet::new(),
            statistics: Arc::new(Statistics::new()),
            open: AtomicBool::new(true),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> &KeyspaceOptions {
        &self.options
    }

    /// Refuse further operations; returns false if already closed
    pub fn close(&self) -> bool {
        let was_open = self.open.swap(false, Ordering::AcqRel);
        if was_open {
            info!(keyspace = %self.name, "keyspace closed");
        }
        was_open
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Get keyspace statistics
    pub fn statistics(&self) -> &Arc<Statistics> {
        &self.statistics
    }

    /// Next write timestamp from the keyspace clock
    pub fn create_clock(&self) -> i64 {
        self.clock.create_clock()
    }

    /// Keep the keyspace clock ahead of a timestamp already stored
    pub(crate) fn observe_timestamp(&self, timestamp: i64) {
        self.clock.observe(timestamp);
    }

    /// Build a column stamped with the keyspace clock
    pub fn create_column(&self, name: impl Into<String>, value: impl Into<String>) -> Column {
        Column::new(name, value, self.create_clock())
    }

    /// Create a new column family
    pub fn create_column_family(
        &self,
        name: &str,
        options: ColumnFamilyOptions,
    ) -> Result<ColumnFamilyHandle> {
        self.track(self.check_open())?;
        let comparator = options.comparator;
        let handle = self.track(self.column_families.create_cf(name.to_string(), options))?;

        self.statistics.record_column_family_created();
        info!(
            keyspace = %self.name,
            column_family = name,
            id = handle.id(),
            comparator = comparator.name(),
            total = self.column_families.count(),
            "created column family"
        );
        Ok(handle)
    }

    /// Drop a column family together with all of its rows
    pub fn drop_column_family(&self, name: &str) -> Result<()> {
        self.track(self.check_open())?;
        let handle = self.track(self.column_families.drop_cf(name))?;

        self.statistics.record_column_family_dropped();
        info!(keyspace = %self.name, column_family = name, id = handle.id(), "dropped column family");
        Ok(())
    }

    /// List all column families
    pub fn list_column_families(&self) -> Vec<ColumnFamilyHandle> {
        self.column_families.list_column_families()
    }

    /// Handle of the named column family, if it exists
    pub fn column_family(&self, name: &str) -> Option<ColumnFamilyHandle> {
        self.column_families
            .get_cf_by_name(name)
            .map(|cf| cf.handle().clone())
    }

    pub fn column_family_options(&self, name: &str) -> Option<ColumnFamilyOptions> {
        self.column_families
            .get_cf_by_name(name)
            .map(|cf| cf.options().clone())
    }

    /// Summary of the column family behind `handle`
    ///
    /// A handle outlives its family: once the family is dropped (even if one
    /// of the same name is created again) the handle fails with
    /// `InvalidColumnFamily`.
    pub fn describe_column_family(
        &self,
        handle: &ColumnFamilyHandle,
    ) -> Result<ColumnFamilyDescription> {
        self.track(self.check_open())?;
        let cf = self.column_families.get_cf(handle).ok_or_else(|| {
            Status::invalid_column_family(format!(
                "Column family '{}' (id {}) no longer exists",
                handle.name(),
                handle.id()
            ))
        });
        Ok(self.track(cf)?.describe())
    }

    /// Apply a mutation batch
    ///
    /// The whole batch is validated before any row is touched, so a failed
    /// batch changes nothing. Mutations for one (column family, row key) are
    /// applied in order under that row's lock; different rows are independent.
    pub fn apply(&self, batch: &MutationBatch) -> Result<MutationResult> {
        let started = Instant::now();
        let resolved = self.track(self.prepare_batch(batch))?;

        let mut totals = RowApplyStats::default();
        for (cf, row_key, mutations) in &resolved {
            let applied = cf.apply_row(row_key, mutations);
            totals.insertions += applied.insertions;
            totals.column_deletions += applied.column_deletions;
            totals.row_deletions += applied.row_deletions;
        }

        self.statistics
            .record_batch(resolved.len() as u64, batch.data_size() as u64);
        self.statistics.record_mutations(
            totals.insertions,
            totals.column_deletions,
            totals.row_deletions,
        );

        let result = MutationResult {
            mutations: batch.count(),
            rows: resolved.len(),
            execution_time_micros: started.elapsed().as_micros() as u64,
        };
        debug!(
            keyspace = %self.name,
            mutations = result.mutations,
            rows = result.rows,
            micros = result.execution_time_micros,
            "applied mutation batch"
        );
        Ok(result)
    }

    /// Check the batch and resolve every row group to its column family
    fn prepare_batch<'b>(
        &self,
        batch: &'b MutationBatch,
    ) -> Result<Vec<(Arc<ColumnFamilyData>, &'b str, Vec<&'b Mutation>)>> {
        self.check_open()?;

        if batch.count() > self.options.max_batch_size {
            return Err(Status::invalid_argument(format!(
                "batch of {} mutations exceeds the limit of {}",
                batch.count(),
                self.options.max_batch_size
            )));
        }

        let mut cfs: HashMap<&str, Arc<ColumnFamilyData>> = HashMap::new();
        let mut resolved = Vec::with_capacity(batch.row_count());

        for (cf_name, row_key, mutations) in batch.row_groups() {
            if row_key.is_empty() {
                return Err(Status::invalid_argument("row key is empty"));
            }

            let cf = match cfs.get(cf_name) {
                Some(cf) => Arc::clone(cf),
                None => {
                    let cf = self.resolve_cf(cf_name)?;
                    cfs.insert(cf_name, Arc::clone(&cf));
                    cf
                },
            };

            for name in mutations.iter().filter_map(|m| m.column_name()) {
                if name.is_empty() {
                    return Err(Status::invalid_argument(format!(
                        "empty column name for row '{row_key}'"
                    )));
                }
                cf.comparator().validate(name)?;
            }

            resolved.push((cf, row_key, mutations));
        }

        Ok(resolved)
    }

    /// Run a slice query
    pub fn query(&self, query: &SliceQuery<'_>) -> Result<ColumnSlice> {
        self.ensure_open()?;
        let (Some(column_family), Some(key)) = (query.column_family(), query.key()) else {
            self.statistics.record_error();
            return Err(Status::invalid_argument(
                "slice query needs a column family and a key",
            ));
        };
        self.get_slice(column_family, key, query.predicate())
    }

    /// Columns of one row selected by `predicate`
    ///
    /// A missing row yields an empty slice, not an error.
    pub fn get_slice(
        &self,
        column_family: &str,
        key: &str,
        predicate: &SlicePredicate,
    ) -> Result<ColumnSlice> {
        let columns = self.track(self.read_row(column_family, key, predicate, |row, comparator| {
            predicate.resolve(row, comparator)
        }))?
        .unwrap_or_default();

        let bytes: usize = columns.iter().map(Column::size).sum();
        self.statistics
            .record_slice(columns.len() as u64, bytes as u64);
        trace!(
            keyspace = %self.name,
            column_family,
            key,
            columns = columns.len(),
            "slice query"
        );

        Ok(ColumnSlice::new(columns))
    }

    /// A single column of one row
    pub fn get_column(&self, column_family: &str, key: &str, name: &str) -> Result<Option<Column>> {
        let predicate = SlicePredicate::ColumnNames(vec![name.to_string()]);
        Ok(self
            .get_slice(column_family, key, &predicate)?
            .into_columns()
            .pop())
    }

    /// Number of columns of one row selected by `predicate`
    pub fn count_columns(
        &self,
        column_family: &str,
        key: &str,
        predicate: &SlicePredicate,
    ) -> Result<usize> {
        let count = self.track(self.read_row(column_family, key, predicate, |row, comparator| {
            predicate.resolve(row, comparator).len()
        }))?;
        Ok(count.unwrap_or(0))
    }

    fn read_row<T>(
        &self,
        column_family: &str,
        key: &str,
        predicate: &SlicePredicate,
        f: impl FnOnce(&Row, ComparatorType) -> T,
    ) -> Result<Option<T>> {
        self.check_open()?;
        let cf = self.resolve_cf(column_family)?;
        let comparator = cf.comparator();
        predicate.validate(comparator)?;
        Ok(cf.with_row(key, |row| f(row, comparator)))
    }

    /// All column families, for checkpointing
    pub(crate) fn column_family_data(&self) -> Vec<Arc<ColumnFamilyData>> {
        self.column_families.all()
    }

    fn resolve_cf(&self, name: &str) -> Result<Arc<ColumnFamilyData>> {
        self.column_families.get_cf_by_name(name).ok_or_else(|| {
            Status::invalid_column_family(format!(
                "Column family '{name}' not found in keyspace '{}'",
                self.name
            ))
        })
    }

    /// `StoreUnavailable` once closed, counted as an error
    pub(crate) fn ensure_open(&self) -> Result<()> {
        self.track(self.check_open())
    }

    fn check_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            warn!(keyspace = %self.name, "operation rejected: keyspace is closed");
            Err(Status::store_unavailable(format!(
                "keyspace '{}' is closed",
                self.name
            )))
        }
    }

    /// Count failures in the statistics on their way out
    #[inline]
    fn track<T>(&self, result: Result<T>) -> Result<T> {
        if result.is_err() {
            self.statistics.record_error();
        }
        result
    }
}
