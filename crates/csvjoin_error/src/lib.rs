//! Errors shared by all csvjoin crates.

use std::error::Error as StdError;
use std::path::PathBuf;

/// Boxed source error for failures coming out of third-party readers and
/// writers.
pub type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum JoinError {
    /// Input is neither a csv file on disk nor an in-memory table.
    #[error("expected a path to a csv file or an in-memory table, got {0}")]
    InvalidInputType(String),

    #[error("file not found on this path: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {input}: {source}")]
    ReadError {
        input: String,
        #[source]
        source: BoxError,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("no column named '{column}' in the {side} input")]
    InvalidColumn { column: String, side: String },

    #[error("invalid join type '{0}', there are 3 types of joining: inner, left, right")]
    InvalidJoinType(String),

    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),

    #[error("column '{column}' has {got} rows, expected {expected}")]
    RowCountMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    #[error("wrong joining command '{0}', expected: join <left> <right> <column> <type>")]
    InvalidCommand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("internal: {0}")]
    Internal(String),
}

impl JoinError {
    pub fn read(input: impl Into<String>, source: impl Into<BoxError>) -> Self {
        JoinError::ReadError {
            input: input.into(),
            source: source.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: impl Into<BoxError>) -> Self {
        JoinError::WriteError {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn invalid_column(column: impl Into<String>, side: impl Into<String>) -> Self {
        JoinError::InvalidColumn {
            column: column.into(),
            side: side.into(),
        }
    }
}

pub type Result<T, E = JoinError> = std::result::Result<T, E>;

#[macro_export]
macro_rules! internal {
    ($($arg:tt)*) => {
        $crate::JoinError::Internal(std::format!($($arg)*))
    };
}
