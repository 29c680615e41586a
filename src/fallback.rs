//! Deterministic placeholder results for degraded branches.
//!
//! When the gateway or extractor fails, the pipeline still owes the
//! caller a structurally valid result. The placeholder is a pure function
//! of the input fingerprint: resubmitting the same text during an outage
//! produces the same vector every time, never fresh noise.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{AnalysisConfig, ScoreDomain};
use crate::fingerprint::Fingerprint;
use crate::types::{AnalysisResult, DegradationReason, Provenance};

/// Synthesize a structurally valid result from a fingerprint.
///
/// Per-dimension values come from a ChaCha8 stream seeded by the digest;
/// the scalar score is a length-derived statistic of the input text,
/// independent of the draws, so score and vector are each reproducible on
/// their own. The summary names the degradation class and flags the
/// result as a local estimate — it is never presented as a model
/// judgment.
pub fn synthesize(
    fingerprint: &Fingerprint,
    reason: DegradationReason,
    config: &AnalysisConfig,
) -> AnalysisResult {
    let mut rng = ChaCha8Rng::from_seed(fingerprint.seed_bytes());
    let max = config.domain.max();
    let values = (0..config.dimension_count())
        .map(|_| rng.gen_range(0.0..=max))
        .collect();

    AnalysisResult {
        score: length_score(fingerprint.source_len(), config.domain),
        values,
        summary: format!(
            "Fallback estimate ({}): synthesized locally, not a model judgment.",
            reason.describe()
        ),
        provenance: Provenance::Fallback,
    }
}

/// Deterministic score statistic: byte length folded into the domain.
fn length_score(len: usize, domain: ScoreDomain) -> f64 {
    domain.scale((len % 97) as f64 / 96.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_tracks_length_only() {
        assert_eq!(
            length_score(19, ScoreDomain::ZeroToTen),
            length_score(19, ScoreDomain::ZeroToTen)
        );
        assert_ne!(
            length_score(3, ScoreDomain::ZeroToTen),
            length_score(4, ScoreDomain::ZeroToTen)
        );
    }

    #[test]
    fn score_stays_in_domain() {
        for len in 0..300 {
            let score = length_score(len, ScoreDomain::Unit);
            assert!((0.0..=1.0).contains(&score), "len {len} gave {score}");
        }
    }
}
