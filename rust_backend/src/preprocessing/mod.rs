pub mod pipeline;
pub mod thresholds;
pub mod validator;

pub use pipeline::{AnalysisData, AnalysisPipeline};
pub use thresholds::{resolve_thresholds, ResolvedThresholds, ThresholdInput};
pub use validator::{SeriesValidator, ValidationResult, ValidationStats};
