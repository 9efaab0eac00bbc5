use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Code {
    AlreadyExists,
    InvalidColumnFamily,
    StoreUnavailable,
    InvalidArgument,
    IOError,
    Corruption,
}

#[derive(Debug, Clone)]
pub struct Status {
    code: Code,
    message: Option<String>,
}

impl Status {
    pub fn already_exists(msg: impl Into<String>) -> Self {
        Status {
            code: Code::AlreadyExists,
            message: Some(msg.into()),
        }
    }

    pub fn invalid_column_family(msg: impl Into<String>) -> Self {
        Status {
            code: Code::InvalidColumnFamily,
            message: Some(msg.into()),
        }
    }

    pub fn store_unavailable(msg: impl Into<String>) -> Self {
        Status {
            code: Code::StoreUnavailable,
            message: Some(msg.into()),
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Status {
            code: Code::InvalidArgument,
            message: Some(msg.into()),
        }
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Status {
            code: Code::IOError,
            message: Some(msg.into()),
        }
    }

    pub fn corruption(msg: impl Into<String>) -> Self {
        Status {
            code: Code::Corruption,
            message: Some(msg.into()),
        }
    }

    pub fn is_already_exists(&self) -> bool {
        self.code == Code::AlreadyExists
    }

    pub fn is_invalid_column_family(&self) -> bool {
        self.code == Code::InvalidColumnFamily
    }

    pub fn is_store_unavailable(&self) -> bool {
        self.code == Code::StoreUnavailable
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == Code::InvalidArgument
    }

    pub fn is_io_error(&self) -> bool {
        self.code == Code::IOError
    }

    pub fn is_corruption(&self) -> bool {
        self.code == Code::Corruption
    }

    /// Transient failures the caller may retry with backoff.
    ///
    /// Schema conflicts and caller errors are permanent.
    pub fn is_retryable(&self) -> bool {
        self.code == Code::StoreUnavailable
    }

    pub fn code(&self) -> &Code {
        &self.code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{:?}: {}", self.code, msg),
            None => write!(f, "{:?}", self.code),
        }
    }
}

impl std::error::Error for Status {}

impl From<std::io::Error> for Status {
    fn from(err: std::io::Error) -> Self {
        Status::io_error(err.to_string())
    }
}

impl From<serde_json::Error> for Status {
    fn from(err: serde_json::Error) -> Self {
        Status::corruption(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Status>;
