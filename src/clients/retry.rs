//! Bounded retry for transient request failures.
//!
//! A [`RetryPolicy`] caps the number of calls and the time spent waiting
//! between them. The window opens once the first call has returned. Time
//! spent inside calls does not count against it.

use std::future::Future;
use std::time::Duration;

/// Default maximum number of calls, including the first.
pub const DEFAULT_MAX_CALLS: u32 = 3;

/// Default retry window opened after the first call.
pub const DEFAULT_RETRY_WINDOW: Duration = Duration::from_secs(10);

/// Default fixed wait between calls.
pub const RETRY_WAIT_TIME: Duration = Duration::from_secs(1);

/// Limits for retrying a failed operation.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use salesforce_ocapi::clients::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_calls(), 3);
///
/// let patient = RetryPolicy::new(5, Duration::from_secs(60)).with_wait(Duration::from_millis(250));
/// assert_eq!(patient.wait(), Duration::from_millis(250));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    max_calls: u32,
    window: Duration,
    wait: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_calls: DEFAULT_MAX_CALLS,
            window: DEFAULT_RETRY_WINDOW,
            wait: RETRY_WAIT_TIME,
        }
    }
}

/// Classifies a failed attempt.
#[derive(Debug)]
pub enum Attempt<E> {
    /// The failure is transient and the operation may be called again.
    Retry(E),
    /// The failure is final.
    Fail(E),
}

/// Why [`RetryPolicy::run`] gave up.
#[derive(Debug)]
pub enum RetryFailure<E> {
    /// Every allowed call failed with a retryable error.
    Exhausted {
        /// Calls made.
        attempts: u32,
        /// Error from the last call.
        last: E,
    },
    /// A call failed with a non-retryable error.
    Fatal(E),
}

impl RetryPolicy {
    /// Creates a policy with the default wait between calls.
    ///
    /// A `max_calls` of zero is treated as one.
    #[must_use]
    pub const fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls: if max_calls == 0 { 1 } else { max_calls },
            window,
            wait: RETRY_WAIT_TIME,
        }
    }

    /// Returns a policy that never retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    /// Sets the fixed wait between calls.
    #[must_use]
    pub const fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Returns the maximum number of calls.
    #[must_use]
    pub const fn max_calls(&self) -> u32 {
        self.max_calls
    }

    /// Returns the retry window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Returns the wait between calls.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Runs `operation` until it succeeds, fails fatally, or the policy is
    /// exhausted.
    ///
    /// `operation` receives the 1-based call number. A retry is only
    /// scheduled while fewer than `max_calls` calls have been made and the
    /// next wait still fits in the window.
    ///
    /// # Errors
    ///
    /// Returns [`RetryFailure::Fatal`] for an [`Attempt::Fail`] and
    /// [`RetryFailure::Exhausted`] when no further call is allowed after an
    /// [`Attempt::Retry`].
    pub async fn run<T, E, F, Fut>(&self, mut operation: F) -> Result<T, RetryFailure<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, Attempt<E>>>,
    {
        let mut waited = Duration::ZERO;
        let mut calls: u32 = 0;

        loop {
            calls += 1;
            match operation(calls).await {
                Ok(value) => return Ok(value),
                Err(Attempt::Fail(error)) => return Err(RetryFailure::Fatal(error)),
                Err(Attempt::Retry(error)) => {
                    if calls >= self.max_calls || waited + self.wait > self.window {
                        return Err(RetryFailure::Exhausted {
                            attempts: calls,
                            last: error,
                        });
                    }
                    tracing::debug!(call = calls, wait = ?self.wait, "Retrying after transient failure");
                    tokio::time::sleep(self.wait).await;
                    waited += self.wait;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_calls: u32) -> RetryPolicy {
        RetryPolicy::new(max_calls, Duration::from_secs(10)).with_wait(Duration::from_millis(1))
    }

    #[test]
    fn test_default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_calls(), 3);
        assert_eq!(policy.window(), Duration::from_secs(10));
        assert_eq!(policy.wait(), Duration::from_secs(1));
    }

    #[test]
    fn test_zero_calls_is_treated_as_one() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_calls(), 1);
    }

    #[tokio::test]
    async fn test_success_on_first_call() {
        let result: Result<u32, RetryFailure<&str>> =
            fast(3).run(|call| async move { Ok(call) }).await;
        assert_eq!(result.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let result: Result<u32, RetryFailure<&str>> = fast(3)
            .run(|call| async move {
                if call < 3 {
                    Err(Attempt::Retry("timeout"))
                } else {
                    Ok(call)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_exhaustion_reports_attempts() {
        let counter = AtomicU32::new(0);
        let result: Result<(), _> = fast(3)
            .run(|_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(Attempt::Retry("timeout")) }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(RetryFailure::Exhausted {
                attempts: 3,
                last: "timeout"
            })
        ));
    }

    #[tokio::test]
    async fn test_fatal_error_stops_immediately() {
        let counter = AtomicU32::new(0);
        let result: Result<(), _> = fast(3)
            .run(|_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err(Attempt::Fail("boom")) }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(RetryFailure::Fatal("boom"))));
    }

    #[tokio::test]
    async fn test_elapsed_window_stops_retries() {
        let policy = RetryPolicy::new(10, Duration::ZERO).with_wait(Duration::from_millis(1));
        let result: Result<(), _> = policy
            .run(|_| async { Err(Attempt::Retry("timeout")) })
            .await;

        assert!(matches!(
            result,
            Err(RetryFailure::Exhausted { attempts: 1, .. })
        ));
    }

    #[tokio::test]
    async fn test_calls_as_long_as_the_window_are_still_retried() {
        // Each call lasts the whole window, like a request timeout equal to it
        let window = Duration::from_millis(200);
        let policy = RetryPolicy::new(3, window).with_wait(Duration::from_millis(1));
        let counter = AtomicU32::new(0);
        let result: Result<(), _> = policy
            .run(|_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async move {
                    tokio::time::sleep(window).await;
                    Err(Attempt::Retry("timeout"))
                }
            })
            .await;

        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert!(matches!(
            result,
            Err(RetryFailure::Exhausted { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_waits_beyond_the_window_are_not_scheduled() {
        let policy =
            RetryPolicy::new(10, Duration::from_millis(25)).with_wait(Duration::from_millis(10));
        let result: Result<(), _> = policy
            .run(|_| async { Err(Attempt::Retry("timeout")) })
            .await;

        // Two waits fit, the third would overrun the window
        assert!(matches!(
            result,
            Err(RetryFailure::Exhausted { attempts: 3, .. })
        ));
    }
}
