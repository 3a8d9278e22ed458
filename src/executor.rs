//! The retry loop.
//!
//! The first retry always waits the fixed `initial_delay`; the growth
//! formula takes over from the second retry onward, seeded with
//! `initial_delay`. With `max_retries == 0` the loop is unbounded and only
//! a success resolves the future. An always-failing operation under a
//! budget of `n >= 1` retries is invoked exactly `n + 1` times.

use crate::policy::BackoffPolicy;
use async_trait::async_trait;
use std::error::Error;
use std::future::Future;
use tokio::time::sleep;

/// A strategy for driving a fallible operation until it succeeds or gives up.
///
/// The operation is a zero-argument closure producing a future. Every failure
/// is treated identically - the strategy never inspects the error, so a
/// caller that wants different handling per error kind makes that decision
/// inside the operation before returning.
///
/// Implemented for [`BackoffPolicy`]; custom implementations can wrap a
/// policy to layer on concerns the core leaves out, such as deadlines.
///
/// # Examples
///
/// ```rust
/// use retrier::prelude::*;
///
/// # async fn example() -> Result<(), std::io::Error> {
/// let value = BackoffPolicy::DEFAULT.execute(|| async {
///     Ok::<_, std::io::Error>("ready")
/// }).await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Retry: Send + Sync {
    /// Execute `operation`, retrying on failure.
    ///
    /// Returns the first success, or the error from the final attempt once
    /// the retry budget is exhausted. The error is surfaced exactly as the
    /// operation produced it - nothing is wrapped or synthesized.
    async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Error + Send + Sync + 'static;
}

#[async_trait]
impl Retry for BackoffPolicy {
    async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Error + Send + Sync + 'static,
    {
        if let Ok(value) = operation().await {
            return Ok(value);
        }
        let mut retries: u32 = 1;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            delay_ms = self.initial_delay.as_millis() as u64,
            "attempt failed, backing off"
        );
        sleep(self.initial_delay).await;

        let mut last_error = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if self.max_retries == 1 {
            return Err(last_error);
        }

        let mut delay = self.initial_delay;
        loop {
            delay = self.next_delay(delay);
            #[cfg(feature = "tracing")]
            tracing::debug!(
                error = %last_error,
                retries,
                delay_ms = delay.as_millis() as u64,
                "attempt failed, backing off"
            );
            sleep(delay).await;
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    last_error = err;
                    if self.max_retries != 0 {
                        retries += 1;
                        if retries >= self.max_retries {
                            #[cfg(feature = "tracing")]
                            tracing::debug!(retries, "retry budget exhausted");
                            return Err(last_error);
                        }
                    }
                }
            }
        }
    }
}
