use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::util::{Result, Status};

/// Ordering strategy for the column names of a column family
///
/// Chosen once when the column family is created. The comparator decides:
/// - which column names are legal (`validate`)
/// - the natural order of a row's columns in range slices (`compare`)
///
/// | Comparator  | Legal names                 | Order         |
/// |-------------|-----------------------------|---------------|
/// | `Utf8`      | any string                  | lexicographic |
/// | `Ascii`     | ASCII strings               | lexicographic |
/// | `Long`      | decimal `i64`               | numeric       |
/// | `Timestamp` | non-negative epoch millis   | chronological |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComparatorType {
    #[default]
    Utf8,
    Ascii,
    Long,
    Timestamp,
}

impl ComparatorType {
    /// Check that `name` is a legal column name under this comparator
    pub fn validate(&self, name: &str) -> Result<()> {
        match self {
            ComparatorType::Utf8 => Ok(()),
            ComparatorType::Ascii => {
                if name.is_ascii() {
                    Ok(())
                } else {
                    Err(Status::invalid_argument(format!(
                        "column name '{name}' is not ASCII"
                    )))
                }
            },
            ComparatorType::Long => name.parse::<i64>().map(|_| ()).map_err(|_| {
                Status::invalid_argument(format!("column name '{name}' is not a long"))
            }),
            ComparatorType::Timestamp => match name.parse::<i64>() {
                Ok(millis) if millis >= 0 => Ok(()),
                _ => Err(Status::invalid_argument(format!(
                    "column name '{name}' is not an epoch-millisecond timestamp"
                ))),
            },
        }
    }

    /// Compare two column names
    ///
    /// Numeric comparators fall back to byte order for names that do not
    /// parse, so the order stays total.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        match self {
            ComparatorType::Utf8 | ComparatorType::Ascii => a.cmp(b),
            ComparatorType::Long | ComparatorType::Timestamp => {
                match (a.parse::<i64>(), b.parse::<i64>()) {
                    (Ok(x), Ok(y)) => x.cmp(&y),
                    (Ok(_), Err(_)) => Ordering::Less,
                    (Err(_), Ok(_)) => Ordering::Greater,
                    (Err(_), Err(_)) => a.cmp(b),
                }
            },
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ComparatorType::Utf8 => "UTF8Type",
            ComparatorType::Ascii => "AsciiType",
            ComparatorType::Long => "LongType",
            ComparatorType::Timestamp => "TimestampType",
        }
    }
}
