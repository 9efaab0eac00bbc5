mod keyspace;

pub use keyspace::{DEFAULT_MAX_BATCH_SIZE, Keyspace, KeyspaceOptions};
