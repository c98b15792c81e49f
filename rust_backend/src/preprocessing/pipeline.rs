//! Main analysis pipeline.
//!
//! One call turns the two raw tables, a threshold choice and an optional
//! reference table into a fully classified [`AnalysisData`]: schema
//! extraction, validation, threshold resolution, classification and the
//! whole-dataset overview. Per-date views (comparison, daily detail) are
//! separate service calls over the returned data.
//!
//! A run either completes over the full dataset or fails outright on a
//! schema, data or threshold error; warnings are collected on the result
//! and never interrupt computation. Re-running with the same inputs and
//! thresholds reproduces the same result.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::AnalysisConfig;
use crate::core::domain::{
    ClassifiedHourlySlot, ClassifiedMinuteSlot, ThresholdSource, Thresholds,
};
use crate::error::{AnalysisResult, AnalysisWarning};
use crate::parsing::schema;
use crate::parsing::table::RawTable;
use crate::preprocessing::thresholds::{resolve_thresholds, ThresholdInput};
use crate::preprocessing::validator::{SeriesValidator, ValidationStats};
use crate::services::classification::{classify_hourly_series, classify_minute_series};
use crate::services::overview::{compute_overview_data, OverviewData};

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisData {
    /// Canonical sector identity (the hourly series' identity).
    pub identity: String,
    pub thresholds: Thresholds,
    pub threshold_source: ThresholdSource,
    pub hourly: Vec<ClassifiedHourlySlot>,
    pub minute: Vec<ClassifiedMinuteSlot>,
    pub overview: OverviewData,
    /// Sorted distinct dates of the hourly series, for date pickers.
    pub dates: Vec<NaiveDate>,
    pub warnings: Vec<AnalysisWarning>,
    pub validation: ValidationStats,
}

/// Orchestrates one analysis run over in-memory tables.
pub struct AnalysisPipeline {
    config: AnalysisConfig,
}

impl AnalysisPipeline {
    /// Create a pipeline with the default configuration.
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Create a pipeline with a custom configuration.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full analysis chain.
    ///
    /// # Errors
    ///
    /// Fails fast with [`crate::error::AnalysisError`] on a missing
    /// structural column, a non-numeric value cell, or an invalid
    /// threshold pair. Nothing is classified when any of these occur.
    pub fn run(
        &self,
        hourly_table: &RawTable,
        minute_table: &RawTable,
        threshold_input: &ThresholdInput,
        reference: Option<&RawTable>,
    ) -> AnalysisResult<AnalysisData> {
        let hourly_series = schema::extract_hourly_series(hourly_table)?;
        let minute_series = schema::extract_minute_series(minute_table)?;

        let validation = SeriesValidator::validate(&hourly_series, &minute_series);
        let mut warnings = validation.warnings;
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        // the hourly identity is canonical, also for the reference lookup
        let identity = hourly_series.identity.clone();

        let resolved =
            resolve_thresholds(threshold_input, reference, &identity, &self.config)?;
        warnings.extend(resolved.warnings);
        let thresholds = resolved.thresholds;

        let hourly = classify_hourly_series(&hourly_series.records, &thresholds);
        let minute = classify_minute_series(&minute_series.records, &thresholds);
        let overview = compute_overview_data(&hourly, &minute, &thresholds);
        let dates = hourly_series.dates();

        log::debug!(
            "analyzed TV {}: {} hourly slots, {} minute slots over {} days",
            identity,
            hourly.len(),
            minute.len(),
            dates.len()
        );

        Ok(AnalysisData {
            identity,
            thresholds,
            threshold_source: resolved.source,
            hourly,
            minute,
            overview,
            dates,
            warnings,
            validation: validation.stats,
        })
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Status;
    use crate::error::AnalysisError;

    fn hourly_table() -> RawTable {
        RawTable::new(
            vec![
                "ID".to_string(),
                "Date".to_string(),
                "10:00-11:00".to_string(),
            ],
            vec![vec![
                "LFEE".to_string(),
                "2024-01-01".to_string(),
                "70".to_string(),
            ]],
        )
    }

    fn minute_table(identity: &str) -> RawTable {
        RawTable::new(
            vec![
                "ID".to_string(),
                "Date".to_string(),
                "10:00 - LFEE Duration 11 Min".to_string(),
            ],
            vec![vec![
                identity.to_string(),
                "2024-01-01".to_string(),
                "0.5".to_string(),
            ]],
        )
    }

    #[test]
    fn test_run_classifies_both_series() {
        let pipeline = AnalysisPipeline::new();
        let input = ThresholdInput::Manual {
            sustain: 0.6,
            peak: 1.0,
        };

        let data = pipeline
            .run(&hourly_table(), &minute_table("LFEE"), &input, None)
            .unwrap();

        assert_eq!(data.identity, "LFEE");
        assert_eq!(data.threshold_source, ThresholdSource::Manual);
        // 70 >= 60 av/h
        assert_eq!(data.hourly[0].status, Status::Peak);
        // 0.5 < 0.6 av/min
        assert_eq!(data.minute[0].status, Status::UnderSustain);
        assert_eq!(data.dates.len(), 1);
        assert_eq!(data.overview.hourly.counts.peak, 1);
    }

    #[test]
    fn test_identity_mismatch_warns_and_continues() {
        let pipeline = AnalysisPipeline::new();
        let input = ThresholdInput::Auto;

        let data = pipeline
            .run(&hourly_table(), &minute_table("LFEF"), &input, None)
            .unwrap();

        assert_eq!(data.identity, "LFEE");
        assert!(data.warnings.iter().any(|w| matches!(
            w,
            AnalysisWarning::IdentityMismatch { .. }
        )));
    }

    #[test]
    fn test_invalid_thresholds_abort_before_classification() {
        let pipeline = AnalysisPipeline::new();
        let input = ThresholdInput::Manual {
            sustain: 1.0,
            peak: 1.0,
        };

        let err = pipeline
            .run(&hourly_table(), &minute_table("LFEE"), &input, None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Threshold(_)));
    }

    #[test]
    fn test_schema_error_aborts_the_run() {
        let pipeline = AnalysisPipeline::new();
        let bad = RawTable::new(
            vec!["Date".to_string(), "10:00-11:00".to_string()],
            vec![vec!["2024-01-01".to_string(), "70".to_string()]],
        );

        let err = pipeline
            .run(&bad, &minute_table("LFEE"), &ThresholdInput::Auto, None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Schema(_)));
    }
}
