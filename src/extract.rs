//! Recovering a schema instance from free-form model output.
//!
//! The upstream boundary is untyped: responses arrive as bare JSON, JSON
//! buried in prose, fenced code blocks with or without a language label,
//! and occasionally with single or typographic quotes. The extractor is a
//! tolerant scanner over that grammar with explicit error variants, not a
//! strict deserializer — it must never panic on arbitrary input.

use serde_json::Value;

use crate::config::{AnalysisConfig, ScoreDomain};
use crate::error::ExtractionError;

/// A successfully recovered schema instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub score: f64,
    pub values: Vec<f64>,
    pub summary: String,
    /// True when missing fields were coerced under the partial policy;
    /// the pipeline tags such results `Partial`.
    pub coerced: bool,
}

/// Tolerant schema extractor, fixed to one dimension count and domain.
#[derive(Debug, Clone)]
pub struct Extractor {
    dimension_count: usize,
    domain: ScoreDomain,
    allow_partial: bool,
}

impl Extractor {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            dimension_count: config.dimension_count(),
            domain: config.domain,
            allow_partial: config.allow_partial,
        }
    }

    /// Recover a schema instance from arbitrarily-decorated raw text.
    pub fn extract(&self, raw: &str) -> Result<Extracted, ExtractionError> {
        let candidate = candidate_object(raw)?;
        let map = parse_object(candidate)?;
        self.validate(&map)
    }

    fn validate(
        &self,
        map: &serde_json::Map<String, Value>,
    ) -> Result<Extracted, ExtractionError> {
        let mut coerced = false;

        let score = match map.get("score") {
            Some(value) => value.as_f64().ok_or_else(|| {
                ExtractionError::SchemaMismatch("`score` is not a number".into())
            })?,
            None if self.allow_partial => {
                coerced = true;
                self.domain.midpoint()
            }
            None => {
                return Err(ExtractionError::SchemaMismatch(
                    "missing field `score`".into(),
                ));
            }
        };
        if !self.domain.contains(score) {
            return Err(ExtractionError::SchemaMismatch(format!(
                "score {score} outside domain 0..={}",
                self.domain.max()
            )));
        }

        let values = match map.get("values") {
            Some(Value::Array(items)) => {
                if items.len() != self.dimension_count {
                    return Err(ExtractionError::SchemaMismatch(format!(
                        "expected {} values, got {}",
                        self.dimension_count,
                        items.len()
                    )));
                }
                let mut values = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let value = item.as_f64().ok_or_else(|| {
                        ExtractionError::SchemaMismatch(format!(
                            "`values[{index}]` is not a number"
                        ))
                    })?;
                    if !self.domain.contains(value) {
                        return Err(ExtractionError::SchemaMismatch(format!(
                            "values[{index}] = {value} outside domain 0..={}",
                            self.domain.max()
                        )));
                    }
                    values.push(value);
                }
                values
            }
            Some(_) => {
                return Err(ExtractionError::SchemaMismatch(
                    "`values` is not an array".into(),
                ));
            }
            None if self.allow_partial => {
                coerced = true;
                vec![0.0; self.dimension_count]
            }
            None => {
                return Err(ExtractionError::SchemaMismatch(
                    "missing field `values`".into(),
                ));
            }
        };

        let summary = match map.get("summary") {
            Some(Value::String(s)) => s.clone(),
            Some(_) => {
                return Err(ExtractionError::SchemaMismatch(
                    "`summary` is not a string".into(),
                ));
            }
            None if self.allow_partial => {
                coerced = true;
                String::from("(no summary returned)")
            }
            None => {
                return Err(ExtractionError::SchemaMismatch(
                    "missing field `summary`".into(),
                ));
            }
        };

        Ok(Extracted {
            score,
            values,
            summary,
            coerced,
        })
    }
}

/// Candidate span: first `{` to last `}`.
///
/// Deliberately not balanced-brace matching — a brace inside a string
/// value can widen the span, and the parser then rejects it. Tolerating
/// leading/trailing prose and fence markers matters more here than that
/// corner.
fn candidate_object(raw: &str) -> Result<&str, ExtractionError> {
    let start = raw.find('{').ok_or(ExtractionError::NoJsonFound)?;
    let end = raw
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or(ExtractionError::NoJsonFound)?;
    Ok(&raw[start..=end])
}

/// Parse the candidate as a generic key/value map.
///
/// On failure, retries once with non-standard quoting normalized — the
/// upstream inconsistently emits single and typographic quotes. The retry
/// never touches candidates that already parse, so apostrophes inside
/// well-formed summaries survive.
fn parse_object(candidate: &str) -> Result<serde_json::Map<String, Value>, ExtractionError> {
    let parsed = serde_json::from_str::<Value>(candidate).or_else(|first_err| {
        serde_json::from_str::<Value>(&normalize_quotes(candidate))
            .map_err(|_| ExtractionError::MalformedJson(first_err.to_string()))
    })?;
    match parsed {
        Value::Object(map) => Ok(map),
        _ => Err(ExtractionError::MalformedJson(
            "candidate span is not a JSON object".into(),
        )),
    }
}

fn normalize_quotes(candidate: &str) -> String {
    candidate
        .chars()
        .map(|c| match c {
            '\'' | '\u{2018}' | '\u{2019}' | '\u{201C}' | '\u{201D}' => '"',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_span_ignores_surrounding_noise() {
        assert_eq!(candidate_object("xx {\"a\":1} yy").unwrap(), "{\"a\":1}");
    }

    #[test]
    fn candidate_requires_brace_pair() {
        assert_eq!(
            candidate_object("no braces here"),
            Err(ExtractionError::NoJsonFound)
        );
        assert_eq!(candidate_object("} {"), Err(ExtractionError::NoJsonFound));
        assert_eq!(candidate_object(""), Err(ExtractionError::NoJsonFound));
    }

    #[test]
    fn quote_normalization_covers_typographic_quotes() {
        assert_eq!(normalize_quotes("{'a': \u{2018}b\u{2019}}"), "{\"a\": \"b\"}");
    }

    #[test]
    fn well_formed_candidate_skips_normalization() {
        // An apostrophe inside a valid string must survive.
        let map = parse_object("{\"summary\": \"it's fine\"}").unwrap();
        assert_eq!(map["summary"], "it's fine");
    }

    #[test]
    fn non_object_candidate_is_malformed() {
        // First-{/last-} over two objects yields an unparsable span.
        assert!(matches!(
            parse_object("{\"a\":1} {\"b\":2}".trim()),
            Err(ExtractionError::MalformedJson(_))
        ));
    }
}
