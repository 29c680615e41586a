//! Entry point for constructing the pipeline.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{AnalysisConfig, DiffThresholds, ScoreDomain};
use crate::error::ConfigError;
use crate::gateway::{HttpGateway, InferenceGateway, RetryPolicy, RetryingGateway};
use crate::pipeline::Analyzer;

/// Default hosted model: the Flash-class identifier the dashboard uses.
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Main entry point for creating analyzers.
pub struct Huginn;

impl Huginn {
    /// Create a new builder for configuring the pipeline.
    pub fn builder() -> HuginnBuilder {
        HuginnBuilder::new()
    }
}

/// Builder for the analysis pipeline.
///
/// Everything configurable is supplied here: the upstream endpoint,
/// dimension labels and count, numeric domain, timeout, history ring
/// size, divergence thresholds, and retry policy.
pub struct HuginnBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    model: String,
    gateway: Option<Arc<dyn InferenceGateway>>,
    retry: RetryPolicy,
    config: AnalysisConfig,
}

impl HuginnBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            gateway: None,
            retry: RetryPolicy::disabled(),
            config: AnalysisConfig::default(),
        }
    }

    /// Configure the hosted HTTP gateway with an API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the endpoint base URL (testing, proxies).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the model identifier.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Inject a custom gateway implementation. Takes precedence over
    /// `api_key`.
    pub fn gateway(mut self, gateway: Arc<dyn InferenceGateway>) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Opt in to retrying transport failures. Default: disabled, so a
    /// failed call proceeds straight to fallback.
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// Set the dimension labels; their count fixes vector cardinality.
    pub fn dimensions<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.dimensions = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Set the numeric domain for scores and vectors.
    pub fn domain(mut self, domain: ScoreDomain) -> Self {
        self.config.domain = domain;
        self
    }

    /// Set the per-request gateway budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the history ring capacity.
    pub fn history_size(mut self, entries: usize) -> Self {
        self.config.history_size = entries;
        self
    }

    /// Set the divergence label thresholds.
    pub fn thresholds(mut self, thresholds: DiffThresholds) -> Self {
        self.config.thresholds = thresholds;
        self
    }

    /// Set the head-anchored truncation ceiling for outbound text.
    pub fn max_input_chars(mut self, chars: usize) -> Self {
        self.config.max_input_chars = chars;
        self
    }

    /// Coerce missing response fields to domain defaults instead of
    /// failing extraction, tagging such results `Partial`.
    pub fn allow_partial(mut self, enabled: bool) -> Self {
        self.config.allow_partial = enabled;
        self
    }

    /// Build the analyzer.
    pub fn build(self) -> Result<Analyzer, ConfigError> {
        self.config.validate()?;

        let inner: Arc<dyn InferenceGateway> = match (self.gateway, self.api_key) {
            (Some(gateway), _) => gateway,
            (None, Some(key)) => match self.base_url {
                Some(url) => Arc::new(HttpGateway::with_base_url(key, self.model, url)),
                None => Arc::new(HttpGateway::new(key, self.model)),
            },
            (None, None) => return Err(ConfigError::NoEndpoint),
        };

        let gateway: Arc<dyn InferenceGateway> = if self.retry.max_attempts > 1 {
            Arc::new(RetryingGateway::new(inner, self.retry))
        } else {
            inner
        };

        Ok(Analyzer::new(gateway, self.config))
    }
}

impl Default for HuginnBuilder {
    fn default() -> Self {
        Self::new()
    }
}
