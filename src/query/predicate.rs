use std::{cmp::Ordering, collections::HashSet};

use crate::{
    comparator::ComparatorType,
    model::{Column, Row},
    util::{Result, Status},
};

/// Number of columns a range slice returns unless told otherwise
pub const DEFAULT_SLICE_COUNT: usize = 100;

/// A contiguous run of columns in comparator order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRange {
    /// Inclusive lower bound (upper bound when reversed); None = open
    pub start: Option<String>,
    /// Inclusive upper bound (lower bound when reversed); None = open
    pub finish: Option<String>,
    /// Walk from the high end of the row
    pub reversed: bool,
    /// Maximum number of columns returned
    pub count: usize,
}

impl Default for SliceRange {
    fn default() -> Self {
        SliceRange {
            start: None,
            finish: None,
            reversed: false,
            count: DEFAULT_SLICE_COUNT,
        }
    }
}

/// Which columns of a row a read selects
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlicePredicate {
    /// Exactly these names, returned in the order given
    ColumnNames(Vec<String>),
    /// A range in comparator order
    Range(SliceRange),
}

impl Default for SlicePredicate {
    fn default() -> Self {
        SlicePredicate::Range(SliceRange::default())
    }
}

impl SlicePredicate {
    /// Reject ranges whose bounds are illegal or out of order
    pub fn validate(&self, comparator: ComparatorType) -> Result<()> {
        let SlicePredicate::Range(range) = self else {
            return Ok(());
        };

        for bound in [&range.start, &range.finish].into_iter().flatten() {
            comparator.validate(bound)?;
        }

        if let (Some(start), Some(finish)) = (&range.start, &range.finish) {
            let wrong_way = if range.reversed {
                Ordering::Less
            } else {
                Ordering::Greater
            };
            if comparator.compare(start, finish) == wrong_way {
                return Err(Status::invalid_argument(format!(
                    "range start '{start}' is past finish '{finish}' (reversed: {})",
                    range.reversed
                )));
            }
        }
        Ok(())
    }

    /// Select the matching columns of `row`
    pub fn resolve(&self, row: &Row, comparator: ComparatorType) -> Vec<Column> {
        match self {
            SlicePredicate::ColumnNames(names) => {
                let mut seen = HashSet::with_capacity(names.len());
                names
                    .iter()
                    .filter(|name| seen.insert(name.as_str()))
                    .filter_map(|name| row.get(name).cloned())
                    .collect()
            },
            SlicePredicate::Range(range) => Self::resolve_range(range, row, comparator),
        }
    }

    fn resolve_range(range: &SliceRange, row: &Row, comparator: ComparatorType) -> Vec<Column> {
        let mut columns = row.sorted_columns(comparator);
        if range.reversed {
            columns.reverse();
        }

        // In walk direction: before `start` is skipped, after `finish` stops
        let ahead = if range.reversed {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        let behind = ahead.reverse();

        columns
            .into_iter()
            .skip_while(|c| {
                range
                    .start
                    .as_deref()
                    .is_some_and(|start| comparator.compare(c.name(), start) == behind)
            })
            .take_while(|c| {
                range
                    .finish
                    .as_deref()
                    .is_none_or(|finish| comparator.compare(c.name(), finish) != ahead)
            })
            .take(range.count)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(names: &[&str]) -> Row {
        let mut row = Row::new();
        for (seq, name) in names.iter().enumerate() {
            row.insert(Column::new(*name, format!("v_{name}"), 1), seq as u64);
        }
        row
    }

    fn names(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.name()).collect()
    }

    fn range(start: Option<&str>, finish: Option<&str>, reversed: bool, count: usize) -> SlicePredicate {
        SlicePredicate::Range(SliceRange {
            start: start.map(str::to_string),
            finish: finish.map(str::to_string),
            reversed,
            count,
        })
    }

    #[test]
    fn test_names_keep_requested_order_and_skip_missing() {
        let row = row(&["a", "b", "c"]);
        let predicate = SlicePredicate::ColumnNames(vec![
            "c".to_string(),
            "missing".to_string(),
            "a".to_string(),
            "c".to_string(),
        ]);

        let columns = predicate.resolve(&row, ComparatorType::Utf8);
        assert_eq!(names(&columns), vec!["c", "a"]);
    }

    #[test]
    fn test_default_range_returns_all_in_order() {
        let row = row(&["c", "a", "b"]);
        let columns = SlicePredicate::default().resolve(&row, ComparatorType::Utf8);
        assert_eq!(names(&columns), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bounded_range() {
        let row = row(&["a", "b", "c", "d", "e"]);
        let columns = range(Some("b"), Some("d"), false, 100).resolve(&row, ComparatorType::Utf8);
        assert_eq!(names(&columns), vec!["b", "c", "d"]);

        // Bounds need not exist in the row
        let columns = range(Some("bb"), Some("dd"), false, 100).resolve(&row, ComparatorType::Utf8);
        assert_eq!(names(&columns), vec!["c", "d"]);
    }

    #[test]
    fn test_reversed_range_with_count() {
        let row = row(&["a", "b", "c", "d", "e"]);
        let columns = range(Some("d"), None, true, 2).resolve(&row, ComparatorType::Utf8);
        assert_eq!(names(&columns), vec!["d", "c"]);
    }

    #[test]
    fn test_numeric_range() {
        let row = row(&["1", "5", "10", "50", "100"]);
        let columns = range(Some("5"), Some("50"), false, 100).resolve(&row, ComparatorType::Long);
        assert_eq!(names(&columns), vec!["5", "10", "50"]);
    }

    #[test]
    fn test_validate_rejects_inverted_range() {
        assert!(range(Some("d"), Some("b"), false, 10)
            .validate(ComparatorType::Utf8)
            .unwrap_err()
            .is_invalid_argument());
        assert!(range(Some("d"), Some("b"), true, 10)
            .validate(ComparatorType::Utf8)
            .is_ok());
        assert!(range(Some("x"), None, false, 10)
            .validate(ComparatorType::Long)
            .is_err());
    }
}
