//! Backoff policy configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Growth parameters and retry budget for a retry session.
///
/// A policy is an immutable, copyable value. The delay between attempts is
/// derived from the previous delay:
///
/// ```text
/// next = min(max_delay, exponential_growth * (previous + linear_growth))
/// ```
///
/// No validation is performed anywhere; callers are responsible for sane
/// values. The cap only behaves sensibly when `max_delay >= initial_delay`.
///
/// Policies deserialize from configuration with per-field fallback to
/// [`BackoffPolicy::DEFAULT`], so a config file only needs to name the
/// fields it overrides.
///
/// # Examples
///
/// ```rust
/// use retrier::policy::BackoffPolicy;
/// use std::time::Duration;
///
/// // The stock preset: 100ms doubling up to 5s, 10 retries.
/// let policy = BackoffPolicy::DEFAULT;
///
/// // Custom configuration via the builder.
/// let policy = BackoffPolicy::builder()
///     .initial_delay(Duration::from_millis(250))
///     .max_delay(Duration::from_secs(30))
///     .linear_growth(Duration::from_millis(50))
///     .exponential_growth(1.5)
///     .max_retries(8)
///     .build();
///
/// // Or all at once, usable in const contexts.
/// const POLICY: BackoffPolicy = BackoffPolicy::new(
///     Duration::from_millis(250),
///     Duration::from_secs(30),
///     Duration::ZERO,
///     2.0,
///     8,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffPolicy {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on any computed delay.
    pub max_delay: Duration,
    /// Duration added to the delay each step, before scaling.
    pub linear_growth: Duration,
    /// Multiplier applied to the delay each step, after the linear addition.
    pub exponential_growth: f64,
    /// Retry budget. `0` means retry indefinitely.
    pub max_retries: u32,
}

impl BackoffPolicy {
    /// Stock finite policy: 100ms initial delay doubling up to 5s, giving up
    /// after 10 retries.
    pub const DEFAULT: Self = Self {
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_secs(5),
        linear_growth: Duration::ZERO,
        exponential_growth: 2.0,
        max_retries: 10,
    };

    /// Stock unlimited policy: the [`DEFAULT`](Self::DEFAULT) delay curve,
    /// retrying until the operation succeeds.
    pub const DEFAULT_INFINITE: Self = Self {
        initial_delay: Duration::from_millis(100),
        max_delay: Duration::from_secs(5),
        linear_growth: Duration::ZERO,
        exponential_growth: 2.0,
        max_retries: 0,
    };

    /// Create a policy from its parts. `max_retries == 0` retries
    /// indefinitely.
    pub const fn new(
        initial_delay: Duration,
        max_delay: Duration,
        linear_growth: Duration,
        exponential_growth: f64,
        max_retries: u32,
    ) -> Self {
        Self {
            initial_delay,
            max_delay,
            linear_growth,
            exponential_growth,
            max_retries,
        }
    }

    /// Create a policy that retries indefinitely. See [`new`](Self::new) for
    /// the remaining parameters.
    pub const fn new_infinite(
        initial_delay: Duration,
        max_delay: Duration,
        linear_growth: Duration,
        exponential_growth: f64,
    ) -> Self {
        Self::new(initial_delay, max_delay, linear_growth, exponential_growth, 0)
    }

    /// Create a new builder for configuring a policy.
    ///
    /// Unset fields fall back to the [`DEFAULT`](Self::DEFAULT) preset.
    pub fn builder() -> BackoffPolicyBuilder {
        BackoffPolicyBuilder::default()
    }

    /// Compute the delay that follows `previous` in the backoff schedule.
    ///
    /// This is the pure growth step used between attempts once the fixed
    /// initial delay has been spent. It is exposed so the schedule can be
    /// inspected without running an operation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use retrier::policy::BackoffPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = BackoffPolicy::DEFAULT;
    /// let first = policy.next_delay(Duration::from_millis(100));
    /// assert_eq!(first, Duration::from_millis(200));
    /// assert_eq!(policy.next_delay(first), Duration::from_millis(400));
    /// ```
    pub fn next_delay(&self, previous: Duration) -> Duration {
        (previous + self.linear_growth)
            .mul_f64(self.exponential_growth)
            .min(self.max_delay)
    }
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Builder for configuring a [`BackoffPolicy`].
///
/// # Examples
///
/// ```rust
/// use retrier::policy::BackoffPolicy;
/// use std::time::Duration;
///
/// let policy = BackoffPolicy::builder()
///     .initial_delay(Duration::from_secs(1))
///     .max_retries(5)
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct BackoffPolicyBuilder {
    initial_delay: Option<Duration>,
    max_delay: Option<Duration>,
    linear_growth: Option<Duration>,
    exponential_growth: Option<f64>,
    max_retries: Option<u32>,
}

impl BackoffPolicyBuilder {
    /// Set the delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Set the upper bound on any computed delay.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Set the duration added to the delay each step.
    pub fn linear_growth(mut self, growth: Duration) -> Self {
        self.linear_growth = Some(growth);
        self
    }

    /// Set the multiplier applied to the delay each step.
    pub fn exponential_growth(mut self, factor: f64) -> Self {
        self.exponential_growth = Some(factor);
        self
    }

    /// Set the retry budget. `0` means retry indefinitely.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = Some(max_retries);
        self
    }

    /// Build the policy, filling unset fields from
    /// [`BackoffPolicy::DEFAULT`].
    pub fn build(self) -> BackoffPolicy {
        let defaults = BackoffPolicy::DEFAULT;
        BackoffPolicy {
            initial_delay: self.initial_delay.unwrap_or(defaults.initial_delay),
            max_delay: self.max_delay.unwrap_or(defaults.max_delay),
            linear_growth: self.linear_growth.unwrap_or(defaults.linear_growth),
            exponential_growth: self
                .exponential_growth
                .unwrap_or(defaults.exponential_growth),
            max_retries: self.max_retries.unwrap_or(defaults.max_retries),
        }
    }
}
