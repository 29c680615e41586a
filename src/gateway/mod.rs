//! The remote inference boundary.

mod http;
pub mod retry;

pub use http::HttpGateway;
pub use retry::{RetryPolicy, RetryingGateway};

use std::time::Duration;

use async_trait::async_trait;

use crate::error::GatewayError;

/// A single bounded call to the remote inference service.
///
/// Implementations perform exactly one request per [`complete`] call and
/// never retry on their own; retry policy is the caller's decision,
/// expressed by wrapping the gateway in a [`RetryingGateway`].
///
/// [`complete`]: InferenceGateway::complete
#[async_trait]
pub trait InferenceGateway: Send + Sync {
    /// Implementation name for logging and metrics.
    fn name(&self) -> &str;

    /// Send one prompt and return the raw response text.
    ///
    /// The call is bounded by `timeout`; expiry yields
    /// [`GatewayError::Timeout`], not a hang.
    async fn complete(&self, prompt: &str, timeout: Duration) -> Result<String, GatewayError>;
}
