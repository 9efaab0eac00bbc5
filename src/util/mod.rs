mod status;

pub use status::{Code, Result, Status};

/// Longest keyspace or column family name accepted.
pub const MAX_NAME_LEN: usize = 48;

/// Validate a keyspace or column family name: non-empty, word characters only.
pub fn validate_name(kind: &str, name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Status::invalid_argument(format!("{kind} name is empty")));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(Status::invalid_argument(format!(
            "{kind} name '{name}' is longer than {MAX_NAME_LEN} characters"
        )));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(Status::invalid_argument(format!(
            "{kind} name '{name}' may only contain letters, digits and underscores"
        )));
    }
    Ok(())
}
