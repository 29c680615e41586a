//! Pipeline configuration: dimension labels, numeric domain, thresholds.
//!
//! Everything variable is supplied here at construction time; no pipeline
//! component hard-codes labels, ranges, or limits.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The five analysis axes the dashboard ships with.
pub const DEFAULT_DIMENSIONS: [&str; 5] =
    ["religion", "technology", "politics", "economy", "media"];

/// Numeric domain for scores and per-dimension magnitudes.
///
/// Declared once per session and held consistent: every score and vector
/// element the pipeline produces or accepts stays inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDomain {
    /// `0.0 ..= 10.0` — the dashboard's native scale.
    #[default]
    ZeroToTen,
    /// `0.0 ..= 1.0`.
    Unit,
}

impl ScoreDomain {
    /// Upper bound of the domain (lower bound is always 0).
    pub fn max(&self) -> f64 {
        match self {
            ScoreDomain::ZeroToTen => 10.0,
            ScoreDomain::Unit => 1.0,
        }
    }

    /// Whether a value lies inside the domain.
    pub fn contains(&self, value: f64) -> bool {
        value.is_finite() && (0.0..=self.max()).contains(&value)
    }

    /// Midpoint, used as the coercion default under the partial-result
    /// policy.
    pub fn midpoint(&self) -> f64 {
        self.max() / 2.0
    }

    /// Map an in-domain value onto the normalized 0–1 scale.
    pub fn normalize(&self, value: f64) -> f64 {
        value / self.max()
    }

    /// Scale a normalized 0–1 value into the domain.
    pub fn scale(&self, unit: f64) -> f64 {
        unit * self.max()
    }
}

/// Thresholds for the qualitative divergence label.
///
/// Expressed on the normalized 0–1 scale regardless of the active domain;
/// the diff engine normalizes deltas before classifying.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiffThresholds {
    /// Dominant |delta| below this is congruent. Default: 0.15.
    pub congruent: f64,
    /// Dominant |delta| at or above this is a significant divergence.
    /// Default: 0.45. Between the two bounds: partial divergence.
    pub significant: f64,
}

impl Default for DiffThresholds {
    fn default() -> Self {
        Self {
            congruent: 0.15,
            significant: 0.45,
        }
    }
}

impl DiffThresholds {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !(self.congruent > 0.0 && self.congruent < self.significant) {
            return Err(ConfigError::InvalidThresholds {
                congruent: self.congruent,
                significant: self.significant,
            });
        }
        Ok(())
    }
}

/// Configuration shared by every pipeline component.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Ordered dimension labels; the count fixes vector cardinality for
    /// the whole session.
    pub dimensions: Vec<String>,
    /// Numeric domain for scores and vector elements.
    pub domain: ScoreDomain,
    /// Per-request gateway budget.
    pub timeout: Duration,
    /// History ring capacity.
    pub history_size: usize,
    /// Divergence label thresholds.
    pub thresholds: DiffThresholds,
    /// Truncation ceiling for outbound text, in characters (head-anchored).
    pub max_input_chars: usize,
    /// When set, missing response fields are coerced to domain defaults
    /// and the result is tagged `Partial` instead of failing extraction.
    pub allow_partial: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            dimensions: DEFAULT_DIMENSIONS.iter().map(|s| s.to_string()).collect(),
            domain: ScoreDomain::default(),
            timeout: Duration::from_secs(30),
            history_size: 64,
            thresholds: DiffThresholds::default(),
            max_input_chars: 8_000,
            allow_partial: false,
        }
    }
}

impl AnalysisConfig {
    /// Fixed vector cardinality for this session.
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.dimensions.is_empty() {
            return Err(ConfigError::NoDimensions);
        }
        if self.history_size == 0 {
            return Err(ConfigError::ZeroRingSize);
        }
        if self.max_input_chars == 0 {
            return Err(ConfigError::ZeroInputCeiling);
        }
        self.thresholds.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert_eq!(AnalysisConfig::default().dimension_count(), 5);
    }

    #[test]
    fn rejects_empty_dimensions() {
        let config = AnalysisConfig {
            dimensions: vec![],
            ..AnalysisConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoDimensions));
    }

    #[test]
    fn rejects_zero_ring() {
        let config = AnalysisConfig {
            history_size: 0,
            ..AnalysisConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroRingSize));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = AnalysisConfig {
            thresholds: DiffThresholds {
                congruent: 0.5,
                significant: 0.2,
            },
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidThresholds { .. })
        ));
    }

    #[test]
    fn domain_bounds() {
        assert!(ScoreDomain::ZeroToTen.contains(10.0));
        assert!(!ScoreDomain::ZeroToTen.contains(10.01));
        assert!(!ScoreDomain::Unit.contains(-0.1));
        assert!(!ScoreDomain::Unit.contains(f64::NAN));
        assert_eq!(ScoreDomain::ZeroToTen.normalize(5.0), 0.5);
        assert_eq!(ScoreDomain::Unit.scale(0.3), 0.3);
    }
}
