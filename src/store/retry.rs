//! Bounded retry with exponential backoff for store calls.
//!
//! Adapter faults are fatal for the current event, but a transient
//! connection hiccup should not surface to the user on the first miss.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::DatabaseError;

/// Attempts per call, including the first.
const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubles per attempt.
const BASE_DELAY: Duration = Duration::from_millis(100);

/// Run a store operation, retrying transient faults up to [`MAX_ATTEMPTS`]
/// times with exponential backoff. Non-transient errors return immediately.
pub async fn with_backoff<T, F, Fut>(mut op: F) -> Result<T, DatabaseError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DatabaseError>>,
{
    let mut delay = BASE_DELAY;
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_ATTEMPTS && e.is_transient() => {
                warn!(error = %e, attempt, "Store call failed, retrying");
                tokio::time::sleep(delay).await;
                delay *= 2;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test]
    async fn returns_first_success() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, DatabaseError>(7) }
        })
        .await;
        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_transient_then_succeeds() {
        let calls = AtomicU32::new(0);
        let result = with_backoff(|| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(DatabaseError::Query("locked".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_backoff(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(DatabaseError::Pool("down".into())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn non_transient_fails_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_backoff(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async {
                Err(DatabaseError::NotFound {
                    entity: "institution".into(),
                    id: "9".into(),
                })
            }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
