//! Error taxonomy for the analysis pipeline.
//!
//! Three classes, kept as distinct enums because they propagate
//! differently: [`GatewayError`] and [`ExtractionError`] are absorbed at
//! the orchestration boundary and degrade to fallback results, while
//! [`ValidationError`] signals caller misuse and is the only class a
//! caller ever sees as `Err`. [`ConfigError`] covers builder misuse.

use std::time::Duration;

/// Errors from the remote inference boundary.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The upstream did not answer within the caller-supplied budget.
    #[error("upstream timed out after {budget:?}")]
    Timeout { budget: Duration },

    /// The upstream answered but declined to produce content (safety
    /// block, content filter). Kept distinct from [`Transport`] so the
    /// fallback path can report outages and refusals separately.
    ///
    /// [`Transport`]: GatewayError::Transport
    #[error("upstream refused: {reason}")]
    Refused { reason: String },

    /// The upstream could not be reached, or returned a non-content
    /// protocol error.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl GatewayError {
    /// Whether a retry policy may re-issue the request.
    ///
    /// Timeouts are a spent budget and refusals are a content decision
    /// that will not change on resend; only transport failures qualify.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}

/// Errors from recovering a schema instance out of free-form model output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    /// The response contains no `{` … `}` span at all.
    #[error("no JSON object found in response")]
    NoJsonFound,

    /// A candidate span was found but does not parse as JSON, even after
    /// quote normalization.
    #[error("malformed JSON: {0}")]
    MalformedJson(String),

    /// The object parsed but does not satisfy the declared schema
    /// (missing fields, wrong vector length, out-of-domain values).
    #[error("schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Caller misuse of the API.
///
/// The only error class surfaced to the caller as a hard failure;
/// upstream conditions never produce an `Err`, they degrade to
/// fallback-provenance results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("dimension count mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Builder and configuration errors, reported once at construction time.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("no inference endpoint configured")]
    NoEndpoint,

    #[error("at least one dimension label is required")]
    NoDimensions,

    #[error("history ring size must be at least 1")]
    ZeroRingSize,

    #[error(
        "divergence thresholds must satisfy 0 < congruent < significant, got {congruent} / {significant}"
    )]
    InvalidThresholds { congruent: f64, significant: f64 },

    #[error("input ceiling must be at least 1 character")]
    ZeroInputCeiling,
}
