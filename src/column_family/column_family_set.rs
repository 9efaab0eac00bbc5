use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;

use crate::{
    column_family::{ColumnFamilyData, ColumnFamilyHandle, ColumnFamilyOptions},
    util::{Result, Status, validate_name},
};

/// Manages all Column Families in a keyspace
///
/// ColumnFamilySet maintains:
/// - Map of CF name → ColumnFamilyData
/// - Next CF ID allocation
///
/// # Thread Safety
///
/// The name map sits behind one RwLock, held only long enough to clone an
/// `Arc<ColumnFamilyData>`; row traffic never holds it.
///
/// # Lifecycle
///
/// ```text
/// Keyspace open → empty ColumnFamilySet
///         ↓
/// create_column_family → Add to map (name must be unused)
///         ↓
/// drop_column_family → Remove from map, rows go with it
/// ```
pub struct ColumnFamilySet {
    /// Map of CF name → ColumnFamilyData
    column_families: RwLock<HashMap<String, Arc<ColumnFamilyData>>>,

    /// Next CF ID to allocate
    next_id: RwLock<u32>,
}

impl ColumnFamilySet {
    /// Create an empty ColumnFamilySet
    pub fn new() -> Self {
        ColumnFamilySet {
            column_families: RwLock::new(HashMap::new()),
            next_id: RwLock::new(1),
        }
    }

    /// Get column family by handle
    ///
    /// A handle to a family that was dropped and recreated under the same
    /// name resolves to None.
    pub fn get_cf(&self, handle: &ColumnFamilyHandle) -> Option<Arc<ColumnFamilyData>> {
        self.get_cf_by_name(handle.name())
            .filter(|cf| cf.id() == handle.id())
    }

    /// Get column family by name
    pub fn get_cf_by_name(&self, name: &str) -> Option<Arc<ColumnFamilyData>> {
        let cfs = self.column_families.read();
        cfs.get(name).map(Arc::clone)
    }

    /// Create a new column family
    pub fn create_cf(&self, name: String, options: ColumnFamilyOptions) -> Result<ColumnFamilyHandle> {
        validate_name("column family", &name)?;

        let mut cfs = self.column_families.write();
        if cfs.contains_key(&name) {
            return Err(Status::already_exists(format!(
                "Column family '{name}' already exists"
            )));
        }

        // Allocate new ID
        let id = {
            let mut next_id = self.next_id.write();
            let id = *next_id;
            *next_id += 1;
            id
        };

        let cf = Arc::new(ColumnFamilyData::new(id, name.clone(), options));
        let handle = cf.handle().clone();
        cfs.insert(name, cf);

        Ok(handle)
    }

    /// Drop a column family and every row in it
    pub fn drop_cf(&self, name: &str) -> Result<ColumnFamilyHandle> {
        let mut cfs = self.column_families.write();
        match cfs.remove(name) {
            Some(cf) => Ok(cf.handle().clone()),
            None => Err(Status::invalid_column_family(format!(
                "Column family '{name}' not found"
            ))),
        }
    }

    /// List all column family handles, ordered by ID
    pub fn list_column_families(&self) -> Vec<ColumnFamilyHandle> {
        let cfs = self.column_families.read();
        let mut handles: Vec<ColumnFamilyHandle> =
            cfs.values().map(|cf| cf.handle().clone()).collect();
        handles.sort_by_key(|h| h.id());
        handles
    }

    /// All column families, ordered by ID
    pub fn all(&self) -> Vec<Arc<ColumnFamilyData>> {
        let cfs = self.column_families.read();
        let mut all: Vec<Arc<ColumnFamilyData>> = cfs.values().map(Arc::clone).collect();
        all.sort_by_key(|cf| cf.id());
        all
    }

    /// Get number of column families
    pub fn count(&self) -> usize {
        self.column_families.read().len()
    }
}

impl Default for ColumnFamilySet {
    fn default() -> Self {
        Self::new()
    }
}
