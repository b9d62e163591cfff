use std::time::Duration;

use crate::error::ProviderError;

pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(10);

/// Fixed-delay, unbounded retry. There is no attempt cap and no backoff:
/// a provider that keeps failing transiently keeps the caller waiting.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub is_retryable: fn(&ProviderError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: DEFAULT_RETRY_DELAY,
            is_retryable: ProviderError::is_transient,
        }
    }
}

impl RetryPolicy {
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            ..Self::default()
        }
    }

    pub fn should_retry(&self, err: &ProviderError) -> bool {
        (self.is_retryable)(err)
    }
}

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the calling thread.
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
