use std::future::Future;
use std::time::Duration;

use eyre::Result;

const MAX_RETRIES: u32 = 3;
const INITIAL_DELAY_MS: u64 = 100;

/// Whether a repository error is worth retrying. Connection-level
/// failures are; constraint violations and other query errors are not.
pub fn is_transient(report: &eyre::Report) -> bool {
    matches!(
        report.downcast_ref::<sqlx::Error>(),
        Some(sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed)
    )
}

/// Runs a database operation with up to three retries and doubling delay
/// for transient failures. Terminal errors return immediately.
pub async fn with_retry<T, F, Fut>(operation: &str, mut f: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = Duration::from_millis(INITIAL_DELAY_MS);
    let mut attempt = 0;

    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) if is_transient(&err) && attempt < MAX_RETRIES => {
                attempt += 1;
                tracing::warn!(
                    "{} hit a transient error (attempt {}/{}): {}",
                    operation,
                    attempt,
                    MAX_RETRIES,
                    err
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn transient_error() -> eyre::Report {
        eyre::Report::new(sqlx::Error::PoolTimedOut)
    }

    #[test]
    fn transient_detection() {
        assert!(is_transient(&transient_error()));
        assert!(!is_transient(&eyre::eyre!("validation failed")));
        assert!(!is_transient(&eyre::Report::new(sqlx::Error::RowNotFound)));
    }

    #[tokio::test]
    async fn retries_transient_failures_then_succeeds() {
        let attempts = Arc::new(AtomicU32::new(0));

        let result = with_retry("test_op", || {
            let attempts = attempts.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(transient_error())
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn terminal_errors_are_not_retried() {
        let attempts = Arc::new(AtomicU32::new(0));

        let result: Result<()> = with_retry("test_op", || {
            let attempts = attempts.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(eyre::eyre!("constraint violated"))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
