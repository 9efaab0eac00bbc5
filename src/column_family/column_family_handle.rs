/// Handle to a Column Family
///
/// A lightweight reference returned by `Keyspace::create_column_family`.
/// Mutations and queries address column families by name; the handle carries
/// the id so a dropped-and-recreated family can be told apart.
///
/// # Example
///
/// ```ignore
/// use widecol::{Keyspace, KeyspaceOptions, ColumnFamilyOptions};
///
/// let keyspace = Keyspace::open("keySpaceName", KeyspaceOptions::default())?;
/// let users = keyspace.create_column_family("users", ColumnFamilyOptions::default())?;
/// assert_eq!(users.name(), "users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnFamilyHandle {
    /// Internal ID of the column family
    pub(crate) id: u32,

    /// Name of the column family
    pub(crate) name: String,
}

impl ColumnFamilyHandle {
    /// Create a new column family handle
    pub(crate) fn new(id: u32, name: String) -> Self {
        ColumnFamilyHandle { id, name }
    }

    /// Get the column family ID
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Get the column family name
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl AsRef<str> for ColumnFamilyHandle {
    fn as_ref(&self) -> &str {
        &self.name
    }
}
