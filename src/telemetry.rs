//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `gateway` — gateway implementation name (e.g. "http")
//! - `status` — outcome: "ok" or "error"
//! - `reason` — degradation class for fallbacks: "timeout", "refused",
//!   "unreachable", "unparsable"

/// Total gateway requests dispatched by the pipeline.
///
/// Labels: `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "huginn_requests_total";

/// Gateway request duration in seconds, including timed-out calls.
///
/// Labels: `gateway`.
pub const REQUEST_DURATION_SECONDS: &str = "huginn_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `gateway`.
pub const RETRIES_TOTAL: &str = "huginn_retries_total";

/// Total extraction attempts on raw responses.
///
/// Labels: `status` ("ok" | "error").
pub const EXTRACTIONS_TOTAL: &str = "huginn_extractions_total";

/// Total analyses that degraded to a synthesized placeholder.
///
/// Labels: `reason`.
pub const FALLBACKS_TOTAL: &str = "huginn_fallbacks_total";

/// Total history entries evicted by ring overflow.
pub const HISTORY_EVICTIONS_TOTAL: &str = "huginn_history_evictions_total";
