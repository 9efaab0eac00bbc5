use std::fmt;

use serde::{Deserialize, Serialize};

/// A named, timestamped value stored in a row
///
/// The timestamp orders competing writes to the same (row key, column name):
/// the highest timestamp wins.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    name: String,
    value: String,
    timestamp: i64,
}

impl Column {
    pub fn new(name: impl Into<String>, value: impl Into<String>, timestamp: i64) -> Self {
        Column {
            name: name.into(),
            value: value.into(),
            timestamp,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn into_value(self) -> String {
        self.value
    }

    /// Approximate payload size in bytes
    pub fn size(&self) -> usize {
        self.name.len() + self.value.len()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}@{}", self.name, self.value, self.timestamp)
    }
}
