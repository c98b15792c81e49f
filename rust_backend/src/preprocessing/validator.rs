//! Series validation with warning reporting.
//!
//! This pass runs after schema extraction and before classification. It
//! only produces warnings: the fatal schema and numeric checks have already
//! happened, and the conditions detected here (identity mismatch, short
//! days, negative counts) are reportable data-quality issues the analysis
//! can proceed through.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::domain::{HourlyLoadSeries, MinuteOccupancySeries};
use crate::error::AnalysisWarning;

/// Expected number of minute observations per complete day.
pub const MINUTES_PER_DAY: usize = 1440;

/// Cap on individually reported issues of one kind.
const MAX_REPORTED: usize = 5;

/// Summary statistics computed during validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationStats {
    pub hourly_records: usize,
    pub minute_records: usize,
    pub hourly_days: usize,
    pub minute_days: usize,
    pub incomplete_minute_days: usize,
}

/// Validation outcome: collected warnings plus dataset statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub warnings: Vec<AnalysisWarning>,
    pub stats: ValidationStats,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, warning: AnalysisWarning) {
        self.warnings.push(warning);
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Validator for a pair of extracted load/occupancy series.
pub struct SeriesValidator;

impl SeriesValidator {
    /// Validates the two series of one analysis run.
    ///
    /// Checks performed:
    /// - sector identity mismatch between the two series
    /// - minute days that do not carry 1440 observations
    /// - negative load or occupancy values
    /// - duplicate (date, hour) records in the hourly series
    ///
    /// None of these interrupt the run.
    pub fn validate(
        hourly: &HourlyLoadSeries,
        minute: &MinuteOccupancySeries,
    ) -> ValidationResult {
        let mut result = ValidationResult::new();

        result.stats.hourly_records = hourly.records.len();
        result.stats.minute_records = minute.records.len();
        result.stats.hourly_days = hourly.dates().len();
        result.stats.minute_days = minute.dates().len();

        if hourly.identity != minute.identity {
            result.add_warning(AnalysisWarning::IdentityMismatch {
                hourly: hourly.identity.clone(),
                minute: minute.identity.clone(),
            });
        }

        Self::check_minute_day_completeness(minute, &mut result);
        Self::check_negative_values(hourly, minute, &mut result);
        Self::check_duplicate_hours(hourly, &mut result);

        result
    }

    fn check_minute_day_completeness(
        minute: &MinuteOccupancySeries,
        result: &mut ValidationResult,
    ) {
        let mut per_day: HashMap<chrono::NaiveDate, usize> = HashMap::new();
        for record in &minute.records {
            *per_day.entry(record.date).or_insert(0) += 1;
        }

        let mut incomplete: Vec<(chrono::NaiveDate, usize)> = per_day
            .into_iter()
            .filter(|&(_, count)| count != MINUTES_PER_DAY)
            .collect();
        incomplete.sort();

        result.stats.incomplete_minute_days = incomplete.len();
        for (date, count) in incomplete.iter().take(MAX_REPORTED) {
            result.add_warning(AnalysisWarning::DataQuality(format!(
                "minute day {} has {} observations instead of {}",
                date, count, MINUTES_PER_DAY
            )));
        }
        if incomplete.len() > MAX_REPORTED {
            result.add_warning(AnalysisWarning::DataQuality(format!(
                "{} incomplete minute days in total (showing first {})",
                incomplete.len(),
                MAX_REPORTED
            )));
        }
    }

    fn check_negative_values(
        hourly: &HourlyLoadSeries,
        minute: &MinuteOccupancySeries,
        result: &mut ValidationResult,
    ) {
        let mut negatives = 0usize;

        for record in &hourly.records {
            if record.load < 0.0 {
                negatives += 1;
                if negatives <= MAX_REPORTED {
                    result.add_warning(AnalysisWarning::DataQuality(format!(
                        "negative load {} on {} slot {}",
                        record.load, record.date, record.slot_label
                    )));
                }
            }
        }
        for record in &minute.records {
            if record.occupation < 0.0 {
                negatives += 1;
                if negatives <= MAX_REPORTED {
                    result.add_warning(AnalysisWarning::DataQuality(format!(
                        "negative occupation {} on {} at {}",
                        record.occupation, record.date, record.time
                    )));
                }
            }
        }

        if negatives > MAX_REPORTED {
            result.add_warning(AnalysisWarning::DataQuality(format!(
                "{} negative values in total (showing first {})",
                negatives, MAX_REPORTED
            )));
        }
    }

    fn check_duplicate_hours(hourly: &HourlyLoadSeries, result: &mut ValidationResult) {
        use std::collections::HashSet;

        let mut seen = HashSet::new();
        let mut duplicates = 0usize;

        for record in &hourly.records {
            if !seen.insert((record.date, record.hour)) {
                duplicates += 1;
                if duplicates <= MAX_REPORTED {
                    result.add_warning(AnalysisWarning::DataQuality(format!(
                        "duplicate hourly record for {} hour {}",
                        record.date, record.hour
                    )));
                }
            }
        }

        if duplicates > MAX_REPORTED {
            result.add_warning(AnalysisWarning::DataQuality(format!(
                "{} duplicate hourly records in total (showing first {})",
                duplicates, MAX_REPORTED
            )));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{HourlyLoadRecord, MinuteOccupancyRecord};
    use chrono::NaiveDate;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn hourly_series(identity: &str, records: Vec<(u32, u32, f64)>) -> HourlyLoadSeries {
        HourlyLoadSeries {
            identity: identity.to_string(),
            records: records
                .into_iter()
                .map(|(d, hour, load)| HourlyLoadRecord {
                    date: date(d),
                    hour,
                    slot_label: format!("{}:00-{}:00", hour, hour + 1),
                    load,
                })
                .collect(),
        }
    }

    fn full_minute_day(identity: &str, d: u32, occupation: f64) -> MinuteOccupancySeries {
        let mut records = Vec::with_capacity(MINUTES_PER_DAY);
        for hour in 0..24 {
            for minute in 0..60 {
                records.push(MinuteOccupancyRecord {
                    date: date(d),
                    time: format!("{}:{:02}", hour, minute),
                    occupation,
                });
            }
        }
        MinuteOccupancySeries {
            identity: identity.to_string(),
            records,
        }
    }

    #[test]
    fn test_clean_series_produce_no_warnings() {
        let hourly = hourly_series("LFEE", vec![(1, 10, 48.0), (1, 11, 52.0)]);
        let minute = full_minute_day("LFEE", 1, 0.7);

        let result = SeriesValidator::validate(&hourly, &minute);
        assert!(!result.has_warnings());
        assert_eq!(result.stats.hourly_records, 2);
        assert_eq!(result.stats.minute_records, MINUTES_PER_DAY);
        assert_eq!(result.stats.hourly_days, 1);
        assert_eq!(result.stats.minute_days, 1);
        assert_eq!(result.stats.incomplete_minute_days, 0);
    }

    #[test]
    fn test_identity_mismatch_is_reported() {
        let hourly = hourly_series("LFEE", vec![(1, 10, 48.0)]);
        let minute = full_minute_day("LFEF", 1, 0.7);

        let result = SeriesValidator::validate(&hourly, &minute);
        assert_eq!(
            result.warnings,
            vec![AnalysisWarning::IdentityMismatch {
                hourly: "LFEE".to_string(),
                minute: "LFEF".to_string(),
            }]
        );
    }

    #[test]
    fn test_incomplete_minute_day_is_reported() {
        let hourly = hourly_series("LFEE", vec![(1, 10, 48.0)]);
        let minute = MinuteOccupancySeries {
            identity: "LFEE".to_string(),
            records: vec![MinuteOccupancyRecord {
                date: date(1),
                time: "10:00".to_string(),
                occupation: 0.5,
            }],
        };

        let result = SeriesValidator::validate(&hourly, &minute);
        assert_eq!(result.stats.incomplete_minute_days, 1);
        assert!(result.has_warnings());
    }

    #[test]
    fn test_negative_values_and_duplicates_are_reported() {
        let hourly = hourly_series("LFEE", vec![(1, 10, -3.0), (1, 10, 5.0)]);
        let minute = full_minute_day("LFEE", 1, 0.7);

        let result = SeriesValidator::validate(&hourly, &minute);
        let messages: Vec<String> = result.warnings.iter().map(|w| w.to_string()).collect();
        assert!(messages.iter().any(|m| m.contains("negative load")));
        assert!(messages.iter().any(|m| m.contains("duplicate hourly record")));
    }
}
