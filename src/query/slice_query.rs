use crate::{
    keyspace::Keyspace,
    model::Column,
    query::{ColumnSlice, SlicePredicate, SliceRange},
    util::{Result, Status},
};

/// Read of several columns from one row
///
/// Configure the column family, the row key, and either explicit column names
/// or a range, then `execute`:
///
/// ```ignore
/// let slice = SliceQuery::new(&keyspace)
///     .set_column_family("AColumnFamily")
///     .set_key("KEY1")
///     .set_column_names(["ColumnName1", "ColumnName2"])
///     .execute()?;
/// ```
///
/// Without explicit names the query returns the first
/// [`DEFAULT_SLICE_COUNT`](crate::query::DEFAULT_SLICE_COUNT) columns in
/// comparator order.
#[derive(Clone)]
pub struct SliceQuery<'a> {
    keyspace: &'a Keyspace,
    column_family: Option<String>,
    key: Option<String>,
    predicate: SlicePredicate,
}

impl<'a> SliceQuery<'a> {
    pub fn new(keyspace: &'a Keyspace) -> Self {
        SliceQuery {
            keyspace,
            column_family: None,
            key: None,
            predicate: SlicePredicate::default(),
        }
    }

    pub fn set_column_family(&mut self, column_family: impl AsRef<str>) -> &mut Self {
        self.column_family = Some(column_family.as_ref().to_string());
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = Some(key.into());
        self
    }

    /// Select exactly these columns, in this order
    pub fn set_column_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predicate = SlicePredicate::ColumnNames(names.into_iter().map(Into::into).collect());
        self
    }

    /// Select up to `count` columns between `start` and `finish` inclusive
    pub fn set_range(
        &mut self,
        start: Option<&str>,
        finish: Option<&str>,
        reversed: bool,
        count: usize,
    ) -> &mut Self {
        self.predicate = SlicePredicate::Range(SliceRange {
            start: start.map(str::to_string),
            finish: finish.map(str::to_string),
            reversed,
            count,
        });
        self
    }

    pub fn column_family(&self) -> Option<&str> {
        self.column_family.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn predicate(&self) -> &SlicePredicate {
        &self.predicate
    }

    pub fn execute(&self) -> Result<ColumnSlice> {
        self.keyspace.query(self)
    }
}

/// Read of a single named column
pub struct ColumnQuery<'a> {
    keyspace: &'a Keyspace,
    column_family: Option<String>,
    key: Option<String>,
    name: Option<String>,
}

impl<'a> ColumnQuery<'a> {
    pub fn new(keyspace: &'a Keyspace) -> Self {
        ColumnQuery {
            keyspace,
            column_family: None,
            key: None,
            name: None,
        }
    }

    pub fn set_column_family(&mut self, column_family: impl AsRef<str>) -> &mut Self {
        self.column_family = Some(column_family.as_ref().to_string());
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = Some(key.into());
        self
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// The column, or None when the row or the column is absent
    pub fn execute(&self) -> Result<Option<Column>> {
        self.keyspace.ensure_open()?;
        let column_family = required("column family", &self.column_family)?;
        let key = required("key", &self.key)?;
        let name = required("column name", &self.name)?;
        self.keyspace.get_column(column_family, key, name)
    }
}

/// Number of live columns of a row, optionally within a range
pub struct CountQuery<'a> {
    keyspace: &'a Keyspace,
    column_family: Option<String>,
    key: Option<String>,
    range: SliceRange,
}

impl<'a> CountQuery<'a> {
    pub fn new(keyspace: &'a Keyspace) -> Self {
        CountQuery {
            keyspace,
            column_family: None,
            key: None,
            range: SliceRange {
                count: usize::MAX,
                ..Default::default()
            },
        }
    }

    pub fn set_column_family(&mut self, column_family: impl AsRef<str>) -> &mut Self {
        self.column_family = Some(column_family.as_ref().to_string());
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.key = Some(key.into());
        self
    }

    /// Count only columns between `start` and `finish`, at most `max`
    pub fn set_range(&mut self, start: Option<&str>, finish: Option<&str>, max: usize) -> &mut Self {
        self.range = SliceRange {
            start: start.map(str::to_string),
            finish: finish.map(str::to_string),
            reversed: false,
            count: max,
        };
        self
    }

    pub fn execute(&self) -> Result<usize> {
        self.keyspace.ensure_open()?;
        let column_family = required("column family", &self.column_family)?;
        let key = required("key", &self.key)?;
        self.keyspace
            .count_columns(column_family, key, &SlicePredicate::Range(self.range.clone()))
    }
}

fn required<'s>(what: &str, field: &'s Option<String>) -> Result<&'s str> {
    field
        .as_deref()
        .ok_or_else(|| Status::invalid_argument(format!("query has no {what} set")))
}
