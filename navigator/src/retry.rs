use log::{debug, warn};
use std::time::Duration;

/// Fixed-interval, bounded polling for markup that renders asynchronously
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub const fn new(interval: Duration, max_attempts: u32) -> Self {
        Self {
            interval,
            max_attempts,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Duration::from_millis(100), 10)
    }
}

/// Calls `probe` until it yields a value, sleeping `policy.interval` between attempts.
///
/// Returns `None` once `policy.max_attempts` probes came back empty.
pub async fn poll_until<T, F>(policy: RetryPolicy, what: &str, mut probe: F) -> Option<T>
where
    F: FnMut() -> Option<T>,
{
    for attempt in 1..=policy.max_attempts {
        if let Some(found) = probe() {
            return Some(found);
        }
        if attempt < policy.max_attempts {
            debug!(
                "{what} not ready (attempt {attempt}/{}), retrying in {:?}",
                policy.max_attempts, policy.interval
            );
            tokio::time::sleep(policy.interval).await;
        }
    }
    warn!("{what} still missing after {} attempts", policy.max_attempts);
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_returns_once_probe_succeeds() {
        let mut calls = 0;
        let found = poll_until(RetryPolicy::new(Duration::from_millis(50), 5), "cards", || {
            calls += 1;
            (calls == 3).then_some(calls)
        })
        .await;
        assert_eq!(found, Some(3));
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let start = tokio::time::Instant::now();
        let policy = RetryPolicy::new(Duration::from_millis(50), 4);
        let found: Option<()> = poll_until(policy, "cards", || {
            calls += 1;
            None
        })
        .await;
        assert!(found.is_none());
        assert_eq!(calls, 4);
        assert!(start.elapsed() >= Duration::from_millis(150));
        assert!(start.elapsed() < Duration::from_millis(200));
    }
}
