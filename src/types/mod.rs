//! Value objects exchanged across the pipeline.

mod comparison;
mod request;
mod result;

pub use comparison::{ComparisonResult, DivergenceLabel};
pub use request::AnalysisRequest;
pub use result::{AnalysisResult, DegradationReason, Provenance};
