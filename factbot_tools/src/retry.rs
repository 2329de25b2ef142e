use std::time::Duration;

use factbot_core::ExtractionError;
use tokio::time::sleep;
use tracing::warn;

/// Run `operation`, retrying transient failures after each delay in `delays`.
///
/// The operation runs at most `delays.len() + 1` times. Non-transient errors
/// such as [`ExtractionError::EntityNotFound`] are returned immediately.
pub async fn retry_with_backoff<F, Fut, T>(
    mut operation: F,
    delays: &[Duration],
) -> Result<T, ExtractionError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, ExtractionError>>,
{
    let attempts = delays.len() + 1;
    let mut pending = delays.iter();

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() => {
                let Some(delay) = pending.next() else {
                    return Err(e);
                };
                warn!(
                    "Request failed (attempt {}/{}): {e}. Retrying after {:?}...",
                    attempts - pending.len() - 1,
                    attempts,
                    delay
                );
                sleep(*delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
