use thiserror::Error;

/// Boxed error coming back from the database driver.
pub type DriverError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid insert input: {0}")]
    InvalidShape(#[from] ShapeError),
    #[error("entity {entity} has no mapped columns")]
    EmptyEntity { entity: &'static str },
    #[error("preparing `{sql}`: {source}")]
    PrepareFailed { sql: String, source: DriverError },
    #[error("executing record {index} ({rows_inserted} already inserted): {source}")]
    ExecFailed { index: usize, rows_inserted: usize, source: DriverError },
    #[error("closing prepared statement after {rows_inserted} records: {source}")]
    CloseFailed { rows_inserted: usize, source: DriverError },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("expected a struct, found {found}")]
    NotAStruct { found: &'static str },
    #[error("expected a single struct, found a sequence")]
    UnexpectedSequence,
    #[error("expected a sequence of structs, found {found}")]
    NotASequence { found: &'static str },
    #[error("sequence is empty")]
    EmptySequence,
    #[error("element {index} is not a struct: {found}")]
    ElementNotAStruct { index: usize, found: &'static str },
    #[error("element {index} ({found}) does not share the columns of {expected}")]
    Heterogeneous { index: usize, expected: &'static str, found: &'static str },
    #[error("entity {entity} maps column `{column}` more than once")]
    DuplicateColumn { entity: &'static str, column: &'static str },
    #[error("element {index} bound {found} values for {expected} columns")]
    ArityMismatch { index: usize, expected: usize, found: usize },
}

/// Flat classification of an [`Error`], for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidShape,
    EmptyEntity,
    PrepareFailed,
    ExecFailed,
    CloseFailed,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidShape(_) => ErrorKind::InvalidShape,
            Error::EmptyEntity { .. } => ErrorKind::EmptyEntity,
            Error::PrepareFailed { .. } => ErrorKind::PrepareFailed,
            Error::ExecFailed { .. } => ErrorKind::ExecFailed,
            Error::CloseFailed { .. } => ErrorKind::CloseFailed,
        }
    }

    /// Records confirmed inserted before the call failed. Nothing is
    /// rolled back here; that is up to the caller's transaction.
    pub fn rows_inserted(&self) -> usize {
        match self {
            Error::ExecFailed { rows_inserted, .. }
            | Error::CloseFailed { rows_inserted, .. } => *rows_inserted,
            _ => 0,
        }
    }
}
