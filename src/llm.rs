//! LLM provider abstraction
//!
//! The tutor talks to Gemini with search grounding; the trait keeps the
//! controller testable without the network.

mod error;
mod gemini;
mod retry;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::GeminiService;
use retry::RetryingService;
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the LLM provider
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    /// Gateway base URL; when set, the gateway supplies credentials
    pub gateway: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            gateway: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            gateway: non_empty("LLM_GATEWAY"),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(
                non_empty("LLM_TIMEOUT_SECS")
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.gateway.is_some()
    }

    /// Build the service for this configuration
    ///
    /// Each attempt is logged; transient failures are retried.
    ///
    /// Without credentials every request fails with an auth error, so turns
    /// resolve through the apology path instead of refusing to start.
    pub fn build_service(&self) -> Result<Arc<dyn LlmService>, LlmError> {
        let inner: Arc<dyn LlmService> = if self.is_configured() {
            Arc::new(GeminiService::new(self)?)
        } else {
            Arc::new(UnconfiguredService {
                model_id: self.model.clone(),
            })
        };
        let logged: Arc<dyn LlmService> = Arc::new(LoggingService::new(inner));
        Ok(Arc::new(RetryingService::new(logged)))
    }
}

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Stand-in used when no API key or gateway is configured
struct UnconfiguredService {
    model_id: String,
}

#[async_trait]
impl LlmService for UnconfiguredService {
    async fn complete(&self, _request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        Err(LlmError::auth(
            "No API key configured. Set GEMINI_API_KEY or LLM_GATEWAY.",
        ))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Logging wrapper for LLM services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    messages = request.messages.len(),
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    citations = response.citations.len(),
                    "LLM request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    retry_after_secs = e.retry_after.map(|d| d.as_secs()),
                    "LLM request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
