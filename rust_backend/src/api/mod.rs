//! JSON boundary for the external UI shell.
//!
//! The presentation layer (upload widgets, charts, date pickers) lives
//! outside this crate and consumes the analysis results as JSON. These
//! functions are the only place where internal containers cross that
//! boundary, so the wire shape is decided here and nowhere else.
//!
//! Non-finite floats (the NaN deviation columns of zero-load rows)
//! serialize as `null`.

use crate::preprocessing::pipeline::AnalysisData;
use crate::services::compare::DayComparisonData;
use crate::services::daily::DayDetailData;

/// Serialize a full analysis run for the UI shell.
pub fn analysis_to_json(data: &AnalysisData) -> serde_json::Result<String> {
    serde_json::to_string(data)
}

/// Serialize a day comparison table for the UI shell.
pub fn day_comparison_to_json(data: &DayComparisonData) -> serde_json::Result<String> {
    serde_json::to_string(data)
}

/// Serialize a day detail view for the UI shell.
pub fn day_detail_to_json(data: &DayDetailData) -> serde_json::Result<String> {
    serde_json::to_string(data)
}
