use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, QueryError>;

/// Failure taxonomy for search calls. Transient covers conditions a later
/// attempt (or a refreshed session) may cure; Permanent covers malformed
/// requests that will fail identically every time.
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    #[error("Transient API error (status {status}): {message}")]
    Transient { status: u16, message: String },

    #[error("Permanent API error (status {status}): {message}")]
    Permanent { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),
}

impl QueryError {
    /// Classify a non-success HTTP status. 5xx is transient, as are auth
    /// failures (a refreshed token may cure 401/403); remaining 4xx are
    /// permanent.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            401 | 403 => QueryError::Transient { status, message },
            400..=499 => QueryError::Permanent { status, message },
            _ => QueryError::Transient { status, message },
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            QueryError::Transient { .. } | QueryError::Network(_)
        )
    }
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Network(err.to_string())
    }
}

/// Start bound after end bound.
#[derive(Debug, Clone, Error)]
#[error("Invalid date range: {start} is after {end}")]
pub struct InvalidDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}
