//! Error types for tablebuilderlib

use serde_json::Value;
use thiserror::Error;

/// Error type returned by user-supplied callbacks (accessors, formatters, reducers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which aggregate cell a reducer was computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Header,
    Footer,
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Header => write!(f, "header"),
            Slot::Footer => write!(f, "footer"),
        }
    }
}

/// Errors that can occur while declaring or building a table
#[derive(Error, Debug)]
pub enum TableError {
    /// A function accessor failed while extracting a value
    #[error("field '{field}': accessor failed on record {record}: {source}")]
    Resolution {
        field: String,
        record: usize,
        source: BoxError,
    },

    /// A formatter failed on a body or aggregate value
    #[error("field '{field}': formatter failed on value {value}: {source}")]
    Format {
        field: String,
        value: Value,
        source: BoxError,
    },

    /// A header/footer reducer failed
    #[error("field '{field}': {slot} reducer failed over {count} values: {source}")]
    Reduce {
        field: String,
        slot: Slot,
        count: usize,
        source: BoxError,
    },

    /// The section key function failed
    #[error("section key failed on record {record}: {source}")]
    SectionKey { record: usize, source: BoxError },

    /// Two fields were registered under the same name
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),

    /// A field name was referenced that the declaration doesn't contain
    #[error("unknown field name '{0}'")]
    UnknownField(String),

    /// Malformed path expression
    #[error("invalid path expression '{expr}': {message}")]
    InvalidPath { expr: String, message: String },

    /// A style palette with no tokens
    #[error("style palette must contain at least one token")]
    EmptyPalette,

    /// Unrecognized justification keyword
    #[error("invalid justification '{0}' (expected left, center or right)")]
    InvalidJustify(String),
}

impl TableError {
    /// Name of the field the error is attributed to, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            TableError::Resolution { field, .. }
            | TableError::Format { field, .. }
            | TableError::Reduce { field, .. } => Some(field),
            TableError::DuplicateField(name) | TableError::UnknownField(name) => Some(name),
            _ => None,
        }
    }
}
