//! Embedded single-node wide-column store
//!
//! A [`Keyspace`] owns column families; a column family owns rows; a row owns
//! named, timestamped columns. Writes go through a [`Mutator`] as batches of
//! insertions and deletions, reads through a [`SliceQuery`].
//!
//! ```ignore
//! use widecol::{ColumnFamilyOptions, Keyspace, KeyspaceOptions, Mutator, SliceQuery};
//!
//! let keyspace = Keyspace::open("keySpaceName", KeyspaceOptions::default())?;
//! keyspace.create_column_family("AColumnFamily", ColumnFamilyOptions::default())?;
//!
//! let mut mutator = Mutator::new(&keyspace);
//! mutator.add_insertion("KEY1", "AColumnFamily", keyspace.create_column("ColumnName1", "StringValue1"));
//! mutator.execute()?;
//!
//! let slice = SliceQuery::new(&keyspace)
//!     .set_column_family("AColumnFamily")
//!     .set_key("KEY1")
//!     .set_column_names(["ColumnName1"])
//!     .execute()?;
//! assert_eq!(slice.column_by_name("ColumnName1").unwrap().value(), "StringValue1");
//! ```

pub mod checkpoint;
pub mod clock;
pub mod column_family;
pub mod comparator;
pub mod keyspace;
pub mod model;
pub mod mutation;
pub mod query;
pub mod statistics;
pub mod util;

pub use checkpoint::Checkpoint;
pub use clock::{Clock, ClockResolution};
pub use column_family::{ColumnFamilyDescription, ColumnFamilyHandle, ColumnFamilyOptions};
pub use comparator::ComparatorType;
pub use keyspace::{Keyspace, KeyspaceOptions};
pub use model::{Column, Row};
pub use mutation::{Mutation, MutationBatch, MutationResult, Mutator};
pub use query::{ColumnQuery, ColumnSlice, CountQuery, SlicePredicate, SliceQuery, SliceRange};
pub use statistics::Statistics;
pub use util::{Code, Result, Status};
