// Retry-with-backoff for calls that leave the process.
//
// The executor knows nothing about Discord or Reddit. Callers hand it a policy
// (attempt count + delay schedule) and a predicate deciding which errors are
// worth another try. The two predicates we actually use live next to their
// error types: `ChatError::is_retryable` and `ContentError::is_retryable`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// How many times to try, and how long to wait between tries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delays: Vec<Duration>,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delays: Vec<Duration>) -> Self {
        Self {
            max_attempts,
            delays,
        }
    }

    /// The 1s, 2s, 4s schedule used for both Discord sends and Reddit calls.
    pub fn exponential(max_attempts: u32) -> Self {
        Self::new(
            max_attempts,
            vec![
                Duration::from_millis(1000),
                Duration::from_millis(2000),
                Duration::from_millis(4000),
            ],
        )
    }

    /// Delay to wait before `attempt` (1-based). The first attempt never waits;
    /// attempts past the end of the schedule reuse its last entry.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt < 2 || self.delays.is_empty() {
            return Duration::ZERO;
        }
        let index = ((attempt - 2) as usize).min(self.delays.len() - 1);
        self.delays[index]
    }
}

/// Run `op` until it succeeds, the error is not retryable, or the policy runs
/// out of attempts. The last error is returned unchanged.
///
/// `max_attempts` of 0 or 1 both mean a single try.
pub async fn execute<T, E, F, Fut, P>(
    operation: &str,
    policy: &RetryPolicy,
    is_retryable: P,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(operation, attempt, "Succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) => {
                if attempt >= max_attempts || !is_retryable(&err) {
                    tracing::error!(
                        operation,
                        attempt,
                        max_attempts,
                        error = %err,
                        "Giving up"
                    );
                    return Err(err);
                }

                let delay = policy.delay_before(attempt + 1);
                tracing::warn!(
                    operation,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug, PartialEq)]
    enum FakeError {
        Transient,
        Fatal,
    }

    impl Display for FakeError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, vec![Duration::ZERO])
    }

    #[test]
    fn delay_schedule_clamps_to_last_entry() {
        let policy = RetryPolicy::exponential(6);
        assert_eq!(policy.delay_before(1), Duration::ZERO);
        assert_eq!(policy.delay_before(2), Duration::from_secs(1));
        assert_eq!(policy.delay_before(3), Duration::from_secs(2));
        assert_eq!(policy.delay_before(4), Duration::from_secs(4));
        assert_eq!(policy.delay_before(5), Duration::from_secs(4));
        assert_eq!(
            RetryPolicy::new(3, Vec::new()).delay_before(3),
            Duration::ZERO
        );
    }

    #[tokio::test]
    async fn retries_transient_errors_until_success() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = execute("test op", &instant_policy(3), |_| true, move || async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 3 {
                Err(FakeError::Transient)
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_error_after_exhausting_attempts() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), FakeError> =
            execute("test op", &instant_policy(4), |_| true, move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FakeError::Transient)
            })
            .await;

        assert_eq!(result, Err(FakeError::Transient));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn stops_immediately_on_non_retryable_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), FakeError> = execute(
            "test op",
            &instant_policy(5),
            |e| *e == FakeError::Transient,
            move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(FakeError::Fatal)
            },
        )
        .await;

        assert_eq!(result, Err(FakeError::Fatal));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_or_one_attempts_means_single_try() {
        for max_attempts in [0, 1] {
            let counter = AtomicU32::new(0);
            let calls = &counter;
            let _: Result<(), FakeError> =
                execute("test op", &instant_policy(max_attempts), |_| true, move || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Err(FakeError::Transient)
                })
                .await;
            assert_eq!(calls.load(Ordering::SeqCst), 1);
        }
    }
}
