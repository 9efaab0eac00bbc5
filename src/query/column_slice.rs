use crate::model::Column;

/// Result of a slice query: the requested columns that exist in the row
///
/// Requested names missing from the row are simply not present. An empty
/// slice means the row does not exist (never written, or fully deleted).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSlice {
    columns: Vec<Column>,
}

impl ColumnSlice {
    pub fn new(columns: Vec<Column>) -> Self {
        ColumnSlice { columns }
    }

    /// Columns in result order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn into_columns(self) -> Vec<Column> {
        self.columns
    }
}

impl IntoIterator for ColumnSlice {
    type Item = Column;
    type IntoIter = std::vec::IntoIter<Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

impl<'a> IntoIterator for &'a ColumnSlice {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}
