//! Outbound prompt construction.
//!
//! The prompt is the only instruction the remote model gets, so it spells
//! out the full output schema and forbids anything around it. The model
//! will still decorate its output with prose and code fences often enough
//! that the extractor tolerates both.

use crate::config::{AnalysisConfig, ScoreDomain};

/// Builds the single outbound payload for one text sample.
///
/// Pure transform; input validation happens in the
/// [`AnalysisRequest`](crate::types::AnalysisRequest) constructors.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    dimensions: Vec<String>,
    domain: ScoreDomain,
    max_input_chars: usize,
}

impl PromptBuilder {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            dimensions: config.dimensions.clone(),
            domain: config.domain,
            max_input_chars: config.max_input_chars,
        }
    }

    /// Render the outbound prompt for one sample.
    ///
    /// The caller's text is truncated head-anchored: the first
    /// `max_input_chars` characters are kept, the tail is dropped, always
    /// on a character boundary.
    pub fn build(&self, text: &str) -> String {
        let clipped = truncate_chars(text, self.max_input_chars);
        let max = self.domain.max();
        let count = self.dimensions.len();
        let labels = self.dimensions.join(", ");
        format!(
            "Analyze the following text and respond with a single JSON object and \
             nothing else: no prose, no markdown, no code fences.\n\
             The object must have exactly these fields:\n\
             - \"score\": a number between 0 and {max} (overall intensity)\n\
             - \"values\": an array of exactly {count} numbers between 0 and {max}, \
             one per dimension in this order: {labels}\n\
             - \"summary\": a one-sentence string\n\
             Text to analyze:\n{clipped}"
        )
    }
}

/// Head-anchored truncation at a char boundary.
fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
