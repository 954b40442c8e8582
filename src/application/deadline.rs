//! Per-call deadline for repository operations.

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs `fut` with a hard deadline.
///
/// On expiry the inner future is dropped, which cancels any in-flight query,
/// and [`AppError::Internal`] is returned.
pub async fn with_deadline<T, F>(timeout: Duration, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            tracing::warn!(timeout_ms, "Repository call exceeded its deadline");
            Err(AppError::internal(
                "deadline exceeded",
                json!({ "timeout_ms": timeout_ms }),
            ))
        }
    }
}
