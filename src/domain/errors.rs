use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid rating: {0} (expected 1-5)")]
    InvalidRating(i64),
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of a request against the employee data source.
///
/// Views only distinguish two kinds: "not found" for detail lookups and
/// "fetch failed" for everything else.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Failed to fetch employees (HTTP {status})")]
    Status { status: u16 },
    #[error("Employee {id} not found")]
    NotFound { id: u32 },
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}

pub type FetchResult<T> = Result<T, FetchError>;
