//! HTTP gateway for `generateContent`-style REST endpoints.
//!
//! Targets the hosted Gemini API shape: a POST per request, candidates in
//! the response body, and content-policy blocks reported in-band via
//! `promptFeedback.blockReason` or a `SAFETY` finish reason rather than an
//! error status. Those become [`GatewayError::Refused`]; everything that
//! prevents getting a candidate at all becomes
//! [`GatewayError::Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::InferenceGateway;
use crate::error::GatewayError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Client for a hosted generative model.
///
/// The base URL is overridable for testing against wiremock.
pub struct HttpGateway {
    http: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl HttpGateway {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Create a gateway with a custom base URL.
    pub fn with_base_url(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        // No client-level timeout: each call is bounded individually by
        // the caller-supplied budget in `complete`.
        let http = Client::builder()
            .build()
            .expect("failed to build HTTP client");
        Self {
            http,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    async fn post_once(&self, prompt: &str) -> Result<String, GatewayError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Transport(format!(
                "HTTP {status}: {}",
                snippet(&body)
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Transport(format!("invalid response body: {e}")))?;

        if let Some(reason) = body.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(GatewayError::Refused { reason });
        }

        let candidate = body
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Refused {
                reason: "no candidates returned".into(),
            })?;

        if let Some(reason) = candidate.finish_reason.as_deref()
            && matches!(reason, "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST")
        {
            return Err(GatewayError::Refused {
                reason: reason.to_string(),
            });
        }

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| GatewayError::Refused {
                reason: "candidate carried no text".into(),
            })?;

        debug!(bytes = text.len(), model = %self.model, "received completion");
        Ok(text)
    }
}

#[async_trait]
impl InferenceGateway for HttpGateway {
    fn name(&self) -> &str {
        "http"
    }

    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, GatewayError> {
        match tokio::time::timeout(timeout, self.post_once(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(GatewayError::Timeout { budget: timeout }),
        }
    }
}

fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(200)
        .map(|(idx, _)| idx)
        .unwrap_or(body.len());
    &body[..end]
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}
