//! Analysis result value objects.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractionError, GatewayError};

/// Where a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Derived from the remote service's own judgment.
    Native,
    /// Synthesized locally after the gateway or extractor failed. Never
    /// reflects the remote service's semantics, and must stay
    /// distinguishable from native output all the way to the display.
    Fallback,
    /// Native response with missing fields coerced to defaults under the
    /// partial-result policy.
    Partial,
}

impl Provenance {
    /// True for results carrying the remote model's actual judgment,
    /// possibly with coerced gaps.
    pub fn is_native(&self) -> bool {
        matches!(self, Provenance::Native | Provenance::Partial)
    }
}

/// Immutable analysis outcome handed back to the caller.
///
/// Invariants: `score` and every element of `values` lie inside the
/// session's declared domain, and `values.len()` equals the configured
/// dimension count. The pipeline enforces both before a result escapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Scalar intensity score.
    pub score: f64,
    /// Per-dimension magnitudes, one per configured label.
    pub values: Vec<f64>,
    /// Free-text summary. For fallback results this names the
    /// degradation class and flags the result as a local estimate.
    pub summary: String,
    pub provenance: Provenance,
}

/// Why a branch degraded to the fallback generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationReason {
    UpstreamTimeout,
    UpstreamRefused,
    UpstreamUnreachable,
    ResponseUnparsable,
}

impl DegradationReason {
    /// Operator-facing phrase embedded in fallback summaries, so outages
    /// and content-policy refusals stay distinguishable downstream.
    pub fn describe(&self) -> &'static str {
        match self {
            DegradationReason::UpstreamTimeout => "upstream timed out",
            DegradationReason::UpstreamRefused => "upstream refused",
            DegradationReason::UpstreamUnreachable => "upstream unreachable",
            DegradationReason::ResponseUnparsable => "response unparsable",
        }
    }

    /// Short metric label.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            DegradationReason::UpstreamTimeout => "timeout",
            DegradationReason::UpstreamRefused => "refused",
            DegradationReason::UpstreamUnreachable => "unreachable",
            DegradationReason::ResponseUnparsable => "unparsable",
        }
    }
}

impl From<&GatewayError> for DegradationReason {
    fn from(err: &GatewayError) -> Self {
        match err {
            GatewayError::Timeout { .. } => DegradationReason::UpstreamTimeout,
            GatewayError::Refused { .. } => DegradationReason::UpstreamRefused,
            GatewayError::Transport(_) => DegradationReason::UpstreamUnreachable,
        }
    }
}

impl From<&ExtractionError> for DegradationReason {
    fn from(_: &ExtractionError) -> Self {
        DegradationReason::ResponseUnparsable
    }
}
