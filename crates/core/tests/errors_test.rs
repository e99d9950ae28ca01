use std::error::Error;
use trailbook_core::errors::{TrailError, TrailResult};

#[test]
fn test_trail_error_display() {
    let not_found = TrailError::NotFound("Hike not found".to_string());
    let validation = TrailError::Validation("Participants must be at least 1".to_string());
    let capacity = TrailError::CapacityExceeded("2 spots remaining".to_string());
    let duplicate = TrailError::AlreadyBooked("09:00 AM on 2024-06-15".to_string());
    let conflict = TrailError::Conflict("Guide already assigned at that time".to_string());
    let authorization = TrailError::Authorization("Not your assignment".to_string());
    let database = TrailError::Database(eyre::eyre!("Connection refused"));

    assert_eq!(not_found.to_string(), "Resource not found: Hike not found");
    assert_eq!(
        validation.to_string(),
        "Validation error: Participants must be at least 1"
    );
    assert_eq!(capacity.to_string(), "Not enough spots left: 2 spots remaining");
    assert_eq!(
        duplicate.to_string(),
        "Already booked: 09:00 AM on 2024-06-15"
    );
    assert!(conflict.to_string().starts_with("Assignment conflict:"));
    assert!(authorization.to_string().starts_with("Authorization error:"));
    assert!(database.to_string().contains("Database error:"));
}

#[test]
fn test_only_database_errors_are_retryable() {
    assert!(TrailError::Database(eyre::eyre!("timeout")).is_retryable());
    assert!(!TrailError::Validation("bad input".to_string()).is_retryable());
    assert!(!TrailError::CapacityExceeded("full".to_string()).is_retryable());
    assert!(!TrailError::Conflict("overlap".to_string()).is_retryable());
}

#[test]
fn test_error_source_chain() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let trail_error = TrailError::Internal(Box::new(io_error));

    assert!(trail_error.source().is_some());
    assert!(trail_error.to_string().contains("IO error"));
}

#[test]
fn test_trail_result() {
    let result: TrailResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: TrailResult<i32> = Err(TrailError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
