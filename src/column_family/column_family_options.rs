use serde::{Deserialize, Serialize};

use crate::comparator::ComparatorType;

/// Options for a specific Column Family
///
/// Fixed at creation time; a column family's comparator never changes.
///
/// # Example
///
/// ```ignore
/// use widecol::{ColumnFamilyOptions, ComparatorType};
///
/// let options = ColumnFamilyOptions {
///     comparator: ComparatorType::Long,
///     comment: Some("events keyed by epoch second".to_string()),
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnFamilyOptions {
    /// Ordering and validation strategy for column names
    /// Default: UTF-8 lexicographic
    pub comparator: ComparatorType,

    /// Free-form description
    /// Default: None
    pub comment: Option<String>,
}

impl ColumnFamilyOptions {
    pub fn with_comparator(comparator: ComparatorType) -> Self {
        ColumnFamilyOptions {
            comparator,
            ..Default::default()
        }
    }
}
