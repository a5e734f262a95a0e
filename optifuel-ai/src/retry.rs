use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::AiError;

const MAX_RETRIES: u32 = 3;

/// Runs `operation`, retrying only on `RateLimited` with exponential
/// backoff (2^attempt seconds plus up to a second of jitter). Any other
/// error propagates immediately, as does a rate limit that survives all
/// retries.
pub async fn with_retry<T, F, Fut>(mut operation: F) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Err(AiError::RateLimited) if attempt < MAX_RETRIES => {
                let jitter = rand::rng().random_range(0..=1000);
                let delay = Duration::from_millis(1000 * (1 << attempt) + jitter);
                tracing::warn!(attempt, ?delay, "rate limited, backing off");
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            result => return result,
        }
    }
}
