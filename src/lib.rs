//! Huginn — resilient structured text analysis over generative model APIs.
//!
//! Sends a text sample to a remote generative-inference service and turns
//! whatever comes back — clean JSON, JSON buried in prose or code fences,
//! a refusal, a timeout, or garbage — into a stable structured
//! [`AnalysisResult`]. Two samples yield a reproducible
//! [`ComparisonResult`]. When the upstream fails, a deterministic
//! fallback keeps the caller supplied with a well-formed, clearly-tagged
//! placeholder instead of an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use huginn::{Huginn, Provenance};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let analyzer = Huginn::builder()
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let result = analyzer.submit("The quick brown fox").await?;
//!     if result.provenance == Provenance::Fallback {
//!         eprintln!("degraded: {}", result.summary);
//!     }
//!     println!("score {} / values {:?}", result.score, result.values);
//!
//!     let comparison = analyzer.submit_pair("first sample", "second sample").await?;
//!     println!("{}: dominant dimension {}", comparison.label, comparison.dominant_dimension);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod diff;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod fingerprint;
pub mod gateway;
pub mod history;
pub mod pipeline;
pub mod prompt;
pub mod telemetry;
pub mod types;

// Re-export main types at crate root
pub use builder::{Huginn, HuginnBuilder};
pub use config::{AnalysisConfig, DEFAULT_DIMENSIONS, DiffThresholds, ScoreDomain};
pub use error::{ConfigError, ExtractionError, GatewayError, ValidationError};
pub use fingerprint::Fingerprint;
pub use gateway::{HttpGateway, InferenceGateway, RetryPolicy, RetryingGateway};
pub use history::{HistoryEntry, Session};
pub use pipeline::Analyzer;
pub use types::{
    AnalysisRequest, AnalysisResult, ComparisonResult, DegradationReason, DivergenceLabel,
    Provenance,
};
