#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry fallible async operations with linear and exponential backoff.
//!
//! This crate provides two pieces:
//!
//! - [`BackoffPolicy`](policy::BackoffPolicy) - an immutable value describing
//!   how the delay between attempts grows and how many retries are allowed
//! - [`Retry`](executor::Retry) - the execution seam, implemented for
//!   `BackoffPolicy`, that drives an operation until it succeeds or the
//!   retry budget runs out
//!
//! The delay after each failed attempt is derived from the previous delay,
//! not from the attempt count:
//!
//! ```text
//! next = min(max_delay, exponential_growth * (previous + linear_growth))
//! ```
//!
//! A growth factor of `1.0` with a nonzero linear term gives pure linear
//! backoff; a factor above `1.0` with a zero linear term gives pure
//! exponential backoff. The cap is applied on every step, so a saturated
//! delay stays at `max_delay`.
//!
//! A policy is a plain read-only value. Construct it once and drive as many
//! concurrent retry sessions with it as you like; each call to `execute`
//! owns its own counters.
//!
//! # Examples
//!
//! ```rust
//! use retrier::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), std::io::Error> {
//! let policy = BackoffPolicy::builder()
//!     .max_retries(3)
//!     .initial_delay(Duration::from_millis(100))
//!     .build();
//!
//! let value = policy.execute(|| async {
//!     // Your operation here
//!     Ok::<_, std::io::Error>(42)
//! }).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Cancellation
//!
//! The executor itself never gives up while the budget allows another
//! attempt; with an unlimited budget (`max_retries == 0`) the returned
//! future resolves only on success. Callers that need a deadline wrap the
//! future, e.g. with `tokio::time::timeout` - dropping it at a suspension
//! point abandons the session like any other Rust future.
//!
//! # Features
//!
//! - `tracing` (off by default): emit `debug!` events at each backoff
//!   boundary.

pub mod executor;
pub mod policy;

/// Convenient re-exports of commonly used items.
///
/// Import everything with:
///
/// ```rust
/// use retrier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::executor::Retry;
    pub use crate::policy::{BackoffPolicy, BackoffPolicyBuilder};
}
