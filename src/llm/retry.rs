//! Retry wrapper for transient model failures

use super::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const MAX_RETRY_ATTEMPTS: u32 = 3;
const BASE_RETRY_DELAY: Duration = Duration::from_secs(1);
const MAX_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Retries network, rate-limit and server errors with exponential backoff
///
/// A `retry_after` hint from the provider replaces the computed delay.
pub struct RetryingService {
    inner: Arc<dyn LlmService>,
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        Self {
            inner,
            max_attempts: MAX_RETRY_ATTEMPTS,
            base_delay: BASE_RETRY_DELAY,
        }
    }

    #[allow(dead_code)] // Used in tests
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Backoff before retry number `attempt` (1-based): 1x, 2x, 4x the base
    fn delay_for(&self, attempt: u32, error: &LlmError) -> Duration {
        error
            .retry_after
            .unwrap_or_else(|| self.base_delay * (1 << attempt.saturating_sub(1).min(8)))
            .min(MAX_RETRY_DELAY)
    }
}

#[async_trait]
impl LlmService for RetryingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let mut attempt = 0;
        loop {
            match self.inner.complete(request).await {
                Err(e) if e.kind.is_retryable() && attempt < self.max_attempts => {
                    attempt += 1;
                    let delay = self.delay_for(attempt, &e);
                    tracing::warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = %delay.as_millis(),
                        error = %e,
                        "Retrying model request"
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    fn model_id(&self) -> &str {
        self.inner.model_id()
    }
}
