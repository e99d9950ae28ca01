use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrailError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not enough spots left: {0}")]
    CapacityExceeded(String),

    #[error("Already booked: {0}")]
    AlreadyBooked(String),

    #[error("Assignment conflict: {0}")]
    Conflict(String),

    #[error("Authorization error: {0}")]
    Authorization(String),

    #[error("Database error: {0}")]
    Database(#[from] eyre::Report),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl TrailError {
    /// Transient failures are worth retrying; everything else is terminal
    /// and must be surfaced to the caller as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, TrailError::Database(_))
    }
}

pub type TrailResult<T> = Result<T, TrailError>;
