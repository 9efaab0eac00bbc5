use std::{
    fs::{self, File},
    io::{self, Write as _},
    path::Path,
    time::SystemTime,
};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    ColumnFamilyOptions, Keyspace, KeyspaceOptions,
    model::Column,
    mutation::MutationBatch,
    util::{Result, Status},
};

/// Format version written into every checkpoint
pub const CHECKPOINT_FORMAT_VERSION: u32 = 1;

/// One row of a checkpointed column family
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowSnapshot {
    pub key: String,
    pub columns: Vec<Column>,
}

/// One column family of a checkpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnFamilySnapshot {
    pub name: String,
    pub options: ColumnFamilyOptions,
    pub rows: Vec<RowSnapshot>,
}

/// On-disk checkpoint document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointData {
    pub version: u32,
    pub keyspace: String,
    pub created_at: u64,
    pub options: KeyspaceOptions,
    pub column_families: Vec<ColumnFamilySnapshot>,
}

/// Checkpoint writes a keyspace to a JSON file and reads it back
///
/// A checkpoint holds:
/// 1. Keyspace name and options
/// 2. Every column family with its options
/// 3. Every non-empty row with its columns and their timestamps
///
/// Rows are captured one at a time under their read locks, so each row is
/// consistent but writes racing the checkpoint may land in some rows and not
/// others.
pub struct Checkpoint;

impl Checkpoint {
    /// Write a checkpoint of `keyspace` to `path` (must not exist)
    pub fn create(keyspace: &Keyspace, path: &Path) -> Result<CheckpointData> {
        if !keyspace.is_open() {
            return Err(Status::store_unavailable(format!(
                "keyspace '{}' is closed",
                keyspace.name()
            )));
        }

        let column_families = keyspace
            .column_family_data()
            .iter()
            .map(|cf| ColumnFamilySnapshot {
                name: cf.name().to_string(),
                options: cf.options().clone(),
                rows: cf
                    .snapshot_rows()
                    .into_iter()
                    .map(|(key, columns)| RowSnapshot { key, columns })
                    .collect(),
            })
            .collect();

        let created_at = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();

        let data = CheckpointData {
            version: CHECKPOINT_FORMAT_VERSION,
            keyspace: keyspace.name().to_string(),
            created_at,
            options: keyspace.options().clone(),
            column_families,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&data)?;
        let mut file = File::create_new(path).map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                Status::invalid_argument(format!(
                    "Checkpoint path {} already exists",
                    path.display()
                ))
            } else {
                Status::from(e)
            }
        })?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        info!(
            keyspace = %data.keyspace,
            path = %path.display(),
            column_families = data.column_families.len(),
            "checkpoint created"
        );
        Ok(data)
    }

    /// Read a checkpoint document without opening a keyspace
    pub fn load(path: &Path) -> Result<CheckpointData> {
        let content = fs::read_to_string(path)?;
        let data: CheckpointData = serde_json::from_str(&content)?;
        if data.version != CHECKPOINT_FORMAT_VERSION {
            return Err(Status::corruption(format!(
                "unsupported checkpoint version {}",
                data.version
            )));
        }
        Ok(data)
    }

    /// Open a new keyspace holding the contents of the checkpoint at `path`
    ///
    /// Columns keep their original timestamps, and the new keyspace clock is
    /// moved past the newest of them so later writes still win.
    pub fn restore(path: &Path) -> Result<Keyspace> {
        let data = Self::load(path)?;
        let keyspace = Keyspace::open(&data.keyspace, data.options.clone())?;

        let limit = keyspace.options().max_batch_size;
        for cf in &data.column_families {
            keyspace.create_column_family(&cf.name, cf.options.clone())?;

            for row in &cf.rows {
                // A row wider than the batch limit is restored in pieces
                for chunk in row.columns.chunks(limit) {
                    let mut batch = MutationBatch::with_capacity(chunk.len());
                    for column in chunk {
                        batch.add_insertion(row.key.as_str(), cf.name.as_str(), column.clone());
                    }
                    keyspace.apply(&batch)?;
                }
                if let Some(newest) = row.columns.iter().map(Column::timestamp).max() {
                    keyspace.observe_timestamp(newest);
                }
            }
        }

        info!(keyspace = %data.keyspace, path = %path.display(), "checkpoint restored");
        Ok(keyspace)
    }
}
