//! Orchestration: the analysis state machine.
//!
//! Each branch runs `Requesting → Extracting → (Succeeded | FallingBack)`;
//! pair requests add a `Comparing` stage after both branches terminate
//! independently. There is no stage from which the pipeline can fail to
//! hand the caller a usable result: gateway and extraction errors degrade
//! to fallback provenance, and the only `Err` the public surface produces
//! is [`ValidationError`] for malformed caller input.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::config::AnalysisConfig;
use crate::diff;
use crate::error::ValidationError;
use crate::extract::Extractor;
use crate::fallback;
use crate::fingerprint::Fingerprint;
use crate::gateway::InferenceGateway;
use crate::history::{HistoryEntry, Session};
use crate::prompt::PromptBuilder;
use crate::telemetry;
use crate::types::{
    AnalysisRequest, AnalysisResult, ComparisonResult, DegradationReason, Provenance,
};

/// Pipeline stage, traced per branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Requesting,
    Extracting,
    Succeeded,
    FallingBack,
    Comparing,
    Completed,
}

/// The analysis pipeline. Built via [`Huginn::builder()`].
///
/// [`Huginn::builder()`]: crate::Huginn::builder
pub struct Analyzer {
    gateway: Arc<dyn InferenceGateway>,
    config: AnalysisConfig,
    prompt: PromptBuilder,
    extractor: Extractor,
    session: Session,
}

impl Analyzer {
    pub(crate) fn new(gateway: Arc<dyn InferenceGateway>, config: AnalysisConfig) -> Self {
        let prompt = PromptBuilder::new(&config);
        let extractor = Extractor::new(&config);
        let session = Session::new(config.history_size);
        Self {
            gateway,
            config,
            prompt,
            extractor,
            session,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Session state: most recent results and the rolling history.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Analyze one text sample.
    ///
    /// Never fails on upstream conditions — a gateway or extraction
    /// failure yields a fallback-provenance result. The only `Err` is
    /// caller misuse.
    pub async fn submit(&self, text: &str) -> Result<AnalysisResult, ValidationError> {
        let request = AnalysisRequest::single(text, &self.config)?;
        let fingerprint = Fingerprint::of(request.text_a());

        let result = self.run_branch(request.text_a(), &fingerprint, &request).await;

        self.session.remember_result(&result);
        self.session
            .record(HistoryEntry::now(fingerprint.digest(), result.score, None));
        debug!(stage = ?Stage::Completed, provenance = ?result.provenance, "analysis completed");
        Ok(result)
    }

    /// Analyze two samples concurrently and compare them.
    ///
    /// The branches have no data dependency and run in parallel; they are
    /// combined only after both terminate, and one branch degrading to
    /// fallback never blocks the other's native success.
    pub async fn submit_pair(
        &self,
        text_a: &str,
        text_b: &str,
    ) -> Result<ComparisonResult, ValidationError> {
        let request = AnalysisRequest::pair(text_a, text_b, &self.config)?;
        let fp_a = Fingerprint::of(text_a);
        let fp_b = Fingerprint::of(text_b);

        let (result_a, result_b) = tokio::join!(
            self.run_branch(text_a, &fp_a, &request),
            self.run_branch(text_b, &fp_b, &request),
        );

        debug!(stage = ?Stage::Comparing, "both branches terminated");
        let comparison = diff::compare(&result_a, &result_b, &self.config)?;

        self.session.remember_comparison(&comparison);
        self.session.record(HistoryEntry::now(
            Fingerprint::of_parts(&[text_a, text_b]).digest(),
            result_a.score,
            Some(result_b.score),
        ));
        debug!(stage = ?Stage::Completed, label = %comparison.label, "comparison completed");
        Ok(comparison)
    }

    /// Drive one sample through request → extract → (succeed | fall back).
    ///
    /// Infallible by construction: every failure path terminates in the
    /// deterministic fallback generator.
    async fn run_branch(
        &self,
        text: &str,
        fingerprint: &Fingerprint,
        request: &AnalysisRequest,
    ) -> AnalysisResult {
        let prompt = self.prompt.build(text);

        debug!(stage = ?Stage::Requesting, gateway = self.gateway.name(), "dispatching prompt");
        let started = Instant::now();
        let outcome = self.gateway.complete(&prompt, request.timeout()).await;
        metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
            "gateway" => self.gateway.name().to_owned(),
        )
        .record(started.elapsed().as_secs_f64());

        let reason = match outcome {
            Ok(raw) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "ok").increment(1);
                debug!(stage = ?Stage::Extracting, bytes = raw.len(), "scanning response");
                match self.extractor.extract(&raw) {
                    Ok(extracted) => {
                        metrics::counter!(telemetry::EXTRACTIONS_TOTAL, "status" => "ok")
                            .increment(1);
                        let provenance = if extracted.coerced {
                            Provenance::Partial
                        } else {
                            Provenance::Native
                        };
                        debug!(stage = ?Stage::Succeeded, ?provenance, "schema recovered");
                        return AnalysisResult {
                            score: extracted.score,
                            values: extracted.values,
                            summary: extracted.summary,
                            provenance,
                        };
                    }
                    Err(e) => {
                        metrics::counter!(telemetry::EXTRACTIONS_TOTAL, "status" => "error")
                            .increment(1);
                        warn!(error = %e, "response did not yield a schema instance");
                        DegradationReason::from(&e)
                    }
                }
            }
            Err(e) => {
                metrics::counter!(telemetry::REQUESTS_TOTAL, "status" => "error").increment(1);
                warn!(error = %e, "gateway call failed");
                DegradationReason::from(&e)
            }
        };

        info!(stage = ?Stage::FallingBack, reason = reason.describe(), "synthesizing placeholder");
        metrics::counter!(telemetry::FALLBACKS_TOTAL, "reason" => reason.label()).increment(1);
        fallback::synthesize(fingerprint, reason, &self.config)
    }
}
