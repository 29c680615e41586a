//! Retry policy and gateway decorator.
//!
//! Retry behaviour lives in one policy object wrapped around the gateway,
//! never inside it: [`RetryPolicy`] decides what is retryable and how
//! long to wait, [`RetryingGateway`] applies it to any
//! [`InferenceGateway`]. The pipeline default is
//! [`RetryPolicy::disabled()`], so a timed-out branch proceeds straight
//! to fallback unless the caller opts in.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tracing::warn;

use super::InferenceGateway;
use crate::error::GatewayError;
use crate::telemetry;

/// Controls whether and how transport failures are re-attempted.
///
/// Uses exponential backoff with optional jitter. Only
/// [`GatewayError::Transport`] is retryable: a timeout is a spent budget
/// and a refusal is a content decision that will not change on resend.
///
/// ```rust
/// # use huginn::RetryPolicy;
/// # use std::time::Duration;
/// let policy = RetryPolicy::new()
///     .max_attempts(5)
///     .initial_delay(Duration::from_millis(200))
///     .jitter(false);
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the initial request).
    /// 1 = no retry. Default: 3.
    pub max_attempts: u32,
    /// Base delay before the first retry. Default: 500ms.
    pub initial_delay: Duration,
    /// Maximum delay between retries (caps exponential growth). Default: 30s.
    pub max_delay: Duration,
    /// Whether to add random jitter to delays. Default: true.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Create a policy with sensible defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the initial request).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the base delay before the first retry.
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Enable or disable jitter.
    pub fn jitter(mut self, enabled: bool) -> Self {
        self.jitter = enabled;
        self
    }

    /// Delay for a given attempt number (0-indexed): exponential backoff
    /// `initial_delay * 2^attempt`, capped at `max_delay`, with jitter
    /// in `[0.5x, 1.5x)` when enabled.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base = self
            .initial_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay);
        if self.jitter {
            base.mul_f64(rand::thread_rng().gen_range(0.5..1.5))
        } else {
            base
        }
    }
}

/// Decorator that wraps an [`InferenceGateway`] with a [`RetryPolicy`].
///
/// Retryable errors are re-attempted up to `max_attempts`; everything
/// else is returned immediately.
pub struct RetryingGateway {
    inner: Arc<dyn InferenceGateway>,
    policy: RetryPolicy,
}

impl RetryingGateway {
    /// Wrap a gateway with retry logic.
    pub fn new(inner: Arc<dyn InferenceGateway>, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl InferenceGateway for RetryingGateway {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, GatewayError> {
        let mut last_err = None;
        for attempt in 0..self.policy.max_attempts {
            match self.inner.complete(prompt, timeout).await {
                Ok(raw) => return Ok(raw),
                Err(e) if e.is_retryable() => {
                    metrics::counter!(telemetry::RETRIES_TOTAL,
                        "gateway" => self.inner.name().to_owned(),
                    )
                    .increment(1);
                    if attempt + 1 < self.policy.max_attempts {
                        let delay = self.policy.delay_for_attempt(attempt);
                        warn!(
                            gateway = self.inner.name(),
                            attempt = attempt + 1,
                            max_attempts = self.policy.max_attempts,
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "retrying after transport failure"
                        );
                        tokio::time::sleep(delay).await;
                    }
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err.unwrap_or_else(|| GatewayError::Transport("no attempts were made".into())))
    }
}
