/// Column Family module
///
/// A column family is a named group of rows sharing one comparator, the
/// wide-column analogue of a table. Each CF independently owns:
/// - Its rows (row key → columns)
/// - Its comparator, fixed at creation
/// - Its sequence counter for last-write-wins tie breaks
///
/// # Architecture
///
/// ```text
/// Keyspace
///  ├─→ ColumnFamily("AColumnFamily", UTF8Type)
///  │    ├─→ Row("KEY1") { ColumnName1, ColumnName2, ... }
///  │    └─→ Row("KEY2") { ... }
///  └─→ ColumnFamily("Events", LongType)
///       └─→ ...
/// ```
///
/// # Usage
///
/// ```ignore
/// use widecol::{Keyspace, KeyspaceOptions, ColumnFamilyOptions};
///
/// let keyspace = Keyspace::open("keySpaceName", KeyspaceOptions::default())?;
/// keyspace.create_column_family("AColumnFamily", ColumnFamilyOptions::default())?;
/// ```
mod column_family_data;
pub mod column_family_handle;
pub mod column_family_options;
mod column_family_set;

pub use column_family_data::ColumnFamilyDescription;
pub(crate) use column_family_data::{ColumnFamilyData, RowApplyStats};
pub use column_family_handle::ColumnFamilyHandle;
pub use column_family_options::ColumnFamilyOptions;
pub(crate) use column_family_set::ColumnFamilySet;
