//! Quantifying divergence between two analyzed samples.

use crate::config::{AnalysisConfig, DiffThresholds};
use crate::error::ValidationError;
use crate::types::{AnalysisResult, ComparisonResult, DivergenceLabel};

/// Compare two results dimension by dimension.
///
/// Pure computation; never touches the gateway. `delta[i]` is
/// `b.values[i] - a.values[i]`. The qualitative label classifies the
/// dominant absolute delta on the normalized 0–1 scale, so a 0–10 session
/// uses the same thresholds as a unit-domain one. Errors only on vector
/// cardinality mismatch, which is API misuse the pipeline rejects before
/// anything reaches the display layer.
pub fn compare(
    a: &AnalysisResult,
    b: &AnalysisResult,
    config: &AnalysisConfig,
) -> Result<ComparisonResult, ValidationError> {
    let expected = config.dimension_count();
    // A zero-dimension comparison has no dominant index. Build-time
    // validation requires at least one label, but config fields are
    // public, so reject here rather than index out of bounds below.
    if expected == 0 {
        return Err(ValidationError::DimensionMismatch {
            expected: 1,
            actual: 0,
        });
    }
    for result in [a, b] {
        if result.values.len() != expected {
            return Err(ValidationError::DimensionMismatch {
                expected,
                actual: result.values.len(),
            });
        }
    }

    let delta: Vec<f64> = b
        .values
        .iter()
        .zip(&a.values)
        .map(|(b, a)| b - a)
        .collect();

    // Strict `>` keeps the first-occurring index on ties.
    let mut dominant_dimension = 0;
    for (index, value) in delta.iter().enumerate() {
        if value.abs() > delta[dominant_dimension].abs() {
            dominant_dimension = index;
        }
    }

    let magnitude = config.domain.normalize(delta[dominant_dimension].abs());
    let label = classify(magnitude, &config.thresholds);

    Ok(ComparisonResult {
        a: a.clone(),
        b: b.clone(),
        delta,
        dominant_dimension,
        label,
    })
}

/// Bucket a normalized dominant-delta magnitude.
fn classify(magnitude: f64, thresholds: &DiffThresholds) -> DivergenceLabel {
    if magnitude < thresholds.congruent {
        DivergenceLabel::Congruent
    } else if magnitude < thresholds.significant {
        DivergenceLabel::PartialDivergence
    } else {
        DivergenceLabel::SignificantDivergence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_buckets() {
        let thresholds = DiffThresholds::default();
        assert_eq!(classify(0.0, &thresholds), DivergenceLabel::Congruent);
        assert_eq!(classify(0.14, &thresholds), DivergenceLabel::Congruent);
        assert_eq!(
            classify(0.15, &thresholds),
            DivergenceLabel::PartialDivergence
        );
        assert_eq!(
            classify(0.44, &thresholds),
            DivergenceLabel::PartialDivergence
        );
        assert_eq!(
            classify(0.45, &thresholds),
            DivergenceLabel::SignificantDivergence
        );
    }
}
