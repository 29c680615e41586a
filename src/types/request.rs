//! Analysis request construction and validation.

use std::time::Duration;

use crate::config::AnalysisConfig;
use crate::error::ValidationError;

/// A validated request for one- or two-sample analysis.
///
/// Owned by the caller; the pipeline borrows it for the duration of the
/// call. Construction is the fail-fast point for malformed input — once a
/// request exists, the dimension cardinality and timeout budget are fixed.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    text_a: String,
    text_b: Option<String>,
    dimensions: Vec<String>,
    timeout: Duration,
}

impl AnalysisRequest {
    /// Build a single-sample request against the session configuration.
    pub fn single(
        text: impl Into<String>,
        config: &AnalysisConfig,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        validate_text(&text)?;
        Ok(Self {
            text_a: text,
            text_b: None,
            dimensions: config.dimensions.clone(),
            timeout: config.timeout,
        })
    }

    /// Build a two-sample comparison request.
    pub fn pair(
        text_a: impl Into<String>,
        text_b: impl Into<String>,
        config: &AnalysisConfig,
    ) -> Result<Self, ValidationError> {
        let text_a = text_a.into();
        let text_b = text_b.into();
        validate_text(&text_a)?;
        validate_text(&text_b)?;
        Ok(Self {
            text_a,
            text_b: Some(text_b),
            dimensions: config.dimensions.clone(),
            timeout: config.timeout,
        })
    }

    pub fn text_a(&self) -> &str {
        &self.text_a
    }

    /// Second sample, present only for comparison requests.
    pub fn text_b(&self) -> Option<&str> {
        self.text_b.as_deref()
    }

    pub fn is_pair(&self) -> bool {
        self.text_b.is_some()
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_text() {
        let config = AnalysisConfig::default();
        assert_eq!(
            AnalysisRequest::single("", &config).unwrap_err(),
            ValidationError::EmptyInput
        );
        assert_eq!(
            AnalysisRequest::pair("ok", "  \n", &config).unwrap_err(),
            ValidationError::EmptyInput
        );
    }

    #[test]
    fn carries_session_dimensions() {
        let config = AnalysisConfig::default();
        let request = AnalysisRequest::single("some text", &config).unwrap();
        assert_eq!(request.dimension_count(), config.dimension_count());
        assert!(!request.is_pair());
    }

    #[test]
    fn pair_holds_both_samples() {
        let config = AnalysisConfig::default();
        let request = AnalysisRequest::pair("first", "second", &config).unwrap();
        assert_eq!(request.text_a(), "first");
        assert_eq!(request.text_b(), Some("second"));
        assert!(request.is_pair());
    }
}
