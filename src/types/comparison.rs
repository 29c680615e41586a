//! Comparison value objects.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::result::AnalysisResult;

/// Qualitative bucket for comparison magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DivergenceLabel {
    Congruent,
    PartialDivergence,
    SignificantDivergence,
}

impl fmt::Display for DivergenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DivergenceLabel::Congruent => "congruent",
            DivergenceLabel::PartialDivergence => "partial divergence",
            DivergenceLabel::SignificantDivergence => "significant divergence",
        })
    }
}

/// Quantified divergence between two analyzed samples.
///
/// `delta[i]` is `b.values[i] - a.values[i]`; the dominant dimension is
/// the index with the largest absolute delta, ties broken by the
/// first-occurring index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub a: AnalysisResult,
    pub b: AnalysisResult,
    pub delta: Vec<f64>,
    pub dominant_dimension: usize,
    pub label: DivergenceLabel,
}
