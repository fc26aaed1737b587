use std::fmt;
use thiserror::Error;

/// What went wrong on the last candidate path of a fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastAttempt {
    Status(u16),
    Network(String),
}

impl fmt::Display for LastAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LastAttempt::Status(status) => write!(f, "HTTP status {status}"),
            LastAttempt::Network(reason) => write!(f, "network error: {reason}"),
        }
    }
}

/// Every candidate path of a resource failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("fetching {path} failed ({last})")]
pub struct FetchFailure {
    pub path: String,
    pub last: LastAttempt,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
    #[error("{path} is malformed: {reason}")]
    Malformed { path: String, reason: String },
}

impl ContentError {
    pub fn malformed(path: &str, reason: impl fmt::Display) -> Self {
        ContentError::Malformed {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BadgeError {
    #[error(transparent)]
    Fetch(#[from] FetchFailure),
    #[error("commit history is malformed: {0}")]
    Malformed(String),
    #[error("commit history is empty")]
    Empty,
    #[error("invalid commit date: {0}")]
    InvalidDate(String),
}
