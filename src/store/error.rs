use std::path::PathBuf;

use thiserror::Error;

use crate::models::ValidationError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid ID {id}: expected a number between 1 and {len}")]
    InvalidId { id: usize, len: usize },

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: FieldError },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Spending for {month}/{year} is too large to total")]
    TotalOverflow { year: i32, month: u32 },

    #[error("{} did not load, so changes are not saved until it is fixed or removed", path.display())]
    Unsaved { path: PathBuf },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read or write {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Why one line of a backing file could not become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("invalid {field} '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}
