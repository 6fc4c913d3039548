use std::fmt;
use thiserror::Error;

/// The kind of record an identifier was expected to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Book,
    Path,
    Page,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::Book => write!(f, "Book"),
            RecordKind::Path => write!(f, "Path"),
            RecordKind::Page => write!(f, "Page"),
        }
    }
}

#[derive(Error, Debug)]
pub enum BookError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: RecordKind, id: String },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl BookError {
    pub fn not_found(kind: RecordKind, id: impl ToString) -> Self {
        BookError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, BookError::NotFound { .. })
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, BookError::InvalidState(_))
    }
}

pub type Result<T> = std::result::Result<T, BookError>;
