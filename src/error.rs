//! Error types for record loading, querying and export.

use thiserror::Error;

use crate::data::schema::FIELD_NAMES;

/// Result type alias using RecordError.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Errors that can occur while working with passport records.
#[derive(Debug, Error)]
pub enum RecordError {
    /// Origin could not be opened or read.
    #[error("cannot read source {origin}: {source}")]
    SourceNotFound {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("unknown field '{name}' (expected one of: {})", FIELD_NAMES.join(", "))]
    UnknownField { name: String },

    #[error("No record with number #{number}")]
    NotFound { number: i64 },

    /// Destination could not be created or written. Partial output is left in place.
    #[error("cannot write to {destination}: {source}")]
    DestinationWrite {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

impl RecordError {
    pub fn malformed(line: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub fn unknown_field(name: &str) -> Self {
        Self::UnknownField {
            name: name.to_string(),
        }
    }

    /// True for the recoverable lookup miss; every other variant is fatal.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
