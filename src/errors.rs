//! Centralized error handling.
//!
//! Provides a unified error type for the entire application. Validation
//! and not-found conditions are absorbed into return values by the
//! services; parse, IO and database errors propagate to the caller.

use thiserror::Error;

/// Application error types
///
/// Missing edit/delete targets are not errors here: the services report
/// them as `None` and callers decide what that means.
#[derive(Error, Debug)]
pub enum AppError {
    // Validation
    #[error("{0}")]
    Validation(String),

    /// Malformed filter JSON or undecodable CSV input
    #[error("Parse error: {0}")]
    Parse(String),

    // External service errors
    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        // CSV IO failures surface as IO, decode failures as Parse
        match err.into_kind() {
            csv::ErrorKind::Io(io) => AppError::Io(io),
            other => AppError::Parse(format!("{:?}", other)),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        AppError::Parse(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
