//! Threshold resolution for an analysis run.
//!
//! The operative SUSTAIN/PEAK pair comes from one of three places, in
//! precedence order: explicit user values, a matching row in the optional
//! reference lookup table, or the configured defaults. Problems with the
//! reference table never fail the run; the resolver falls back and records
//! a warning. The only halting validation is `sustain < peak`, checked once
//! the winning pair is known, after which the thresholds are locked.

use crate::config::AnalysisConfig;
use crate::core::domain::{ThresholdSource, Thresholds};
use crate::error::{AnalysisResult, AnalysisWarning};
use crate::parsing::table::RawTable;

/// Sector identity column of the reference lookup table.
pub const REFERENCE_IDENTITY_COLUMN: &str = "Airspace";

/// PEAK threshold column of the reference lookup table (aircraft/minute).
pub const REFERENCE_PEAK_COLUMN: &str = "PEAK 11";

/// SUSTAIN threshold column of the reference lookup table (aircraft/minute).
pub const REFERENCE_SUSTAIN_COLUMN: &str = "SUSTAIN 11";

/// Caller-side threshold choice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdInput {
    /// Use the reference table when available, otherwise the defaults.
    Auto,
    /// Explicit user-chosen values (aircraft/minute).
    Manual { sustain: f64, peak: f64 },
}

/// Outcome of threshold resolution.
#[derive(Debug, Clone)]
pub struct ResolvedThresholds {
    pub thresholds: Thresholds,
    pub source: ThresholdSource,
    pub warnings: Vec<AnalysisWarning>,
}

/// Resolves and locks the thresholds for one analysis run.
///
/// # Errors
///
/// Returns [`crate::error::AnalysisError::Threshold`] when the winning pair
/// violates `sustain < peak`. Reference table problems are downgraded to
/// [`AnalysisWarning::ReferenceLookup`] warnings.
pub fn resolve_thresholds(
    input: &ThresholdInput,
    reference: Option<&RawTable>,
    identity: &str,
    config: &AnalysisConfig,
) -> AnalysisResult<ResolvedThresholds> {
    let mut warnings = Vec::new();

    let (sustain, peak, source) = match *input {
        ThresholdInput::Manual { sustain, peak } => (sustain, peak, ThresholdSource::Manual),
        ThresholdInput::Auto => match reference {
            Some(table) => match lookup_reference(table, identity, config, &mut warnings) {
                Some((sustain, peak)) => (sustain, peak, ThresholdSource::Reference),
                None => (
                    config.default_sustain,
                    config.default_peak,
                    ThresholdSource::Defaults,
                ),
            },
            None => (
                config.default_sustain,
                config.default_peak,
                ThresholdSource::Defaults,
            ),
        },
    };

    for warning in &warnings {
        log::warn!("{}", warning);
    }

    let thresholds = Thresholds::new(sustain, peak)?;

    Ok(ResolvedThresholds {
        thresholds,
        source,
        warnings,
    })
}

/// Looks up the sector's threshold row in the reference table.
///
/// Returns `None` (with a warning pushed) whenever the table cannot supply
/// a usable pair: missing identity column, sector not present, or values
/// that are non-numeric or outside `0..=threshold_max`.
fn lookup_reference(
    table: &RawTable,
    identity: &str,
    config: &AnalysisConfig,
    warnings: &mut Vec<AnalysisWarning>,
) -> Option<(f64, f64)> {
    let identity_idx = match table.column_index(REFERENCE_IDENTITY_COLUMN) {
        Some(idx) => idx,
        None => {
            warnings.push(AnalysisWarning::ReferenceLookup(format!(
                "reference table has no '{}' column",
                REFERENCE_IDENTITY_COLUMN
            )));
            return None;
        }
    };

    let row = (0..table.height())
        .find(|&row| table.cell(row, identity_idx).map(str::trim) == Some(identity));
    let row = match row {
        Some(row) => row,
        None => {
            warnings.push(AnalysisWarning::ReferenceLookup(format!(
                "TV {} not found in reference table, keeping defaults",
                identity
            )));
            return None;
        }
    };

    let sustain_idx = table.column_index(REFERENCE_SUSTAIN_COLUMN);
    let peak_idx = table.column_index(REFERENCE_PEAK_COLUMN);
    if sustain_idx.is_none() && peak_idx.is_none() {
        warnings.push(AnalysisWarning::ReferenceLookup(format!(
            "reference table has neither '{}' nor '{}' column",
            REFERENCE_SUSTAIN_COLUMN, REFERENCE_PEAK_COLUMN
        )));
        return None;
    }

    let mut sustain = config.default_sustain;
    let mut peak = config.default_peak;

    if let Some(idx) = sustain_idx {
        match reference_value(table, row, idx, config) {
            Ok(value) => sustain = value,
            Err(reason) => {
                warnings.push(AnalysisWarning::ReferenceLookup(format!(
                    "unusable '{}' value for TV {}: {}",
                    REFERENCE_SUSTAIN_COLUMN, identity, reason
                )));
                return None;
            }
        }
    }

    if let Some(idx) = peak_idx {
        match reference_value(table, row, idx, config) {
            Ok(value) => peak = value,
            Err(reason) => {
                warnings.push(AnalysisWarning::ReferenceLookup(format!(
                    "unusable '{}' value for TV {}: {}",
                    REFERENCE_PEAK_COLUMN, identity, reason
                )));
                return None;
            }
        }
    }

    Some((sustain, peak))
}

fn reference_value(
    table: &RawTable,
    row: usize,
    col: usize,
    config: &AnalysisConfig,
) -> Result<f64, String> {
    let cell = table.cell(row, col).unwrap_or("").trim();
    let value: f64 = cell
        .parse()
        .map_err(|_| format!("'{}' is not numeric", cell))?;
    if !value.is_finite() || value < 0.0 || value > config.threshold_max {
        return Err(format!(
            "{} is outside the allowed range 0..={}",
            value, config.threshold_max
        ));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::ThresholdSource;
    use crate::error::AnalysisError;

    fn reference_table(rows: Vec<Vec<&str>>) -> RawTable {
        RawTable::new(
            vec![
                "Airspace".to_string(),
                "PEAK 11".to_string(),
                "SUSTAIN 11".to_string(),
            ],
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
        )
    }

    #[test]
    fn test_defaults_without_reference() {
        let config = AnalysisConfig::default();
        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, None, "LFEE", &config).unwrap();

        assert_eq!(resolved.thresholds.sustain(), 0.6);
        assert_eq!(resolved.thresholds.peak(), 1.0);
        assert_eq!(resolved.source, ThresholdSource::Defaults);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_manual_values_win() {
        let config = AnalysisConfig::default();
        let reference = reference_table(vec![vec!["LFEE", "1.5", "0.8"]]);
        let input = ThresholdInput::Manual {
            sustain: 0.4,
            peak: 0.9,
        };

        let resolved = resolve_thresholds(&input, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.thresholds.sustain(), 0.4);
        assert_eq!(resolved.thresholds.peak(), 0.9);
        assert_eq!(resolved.source, ThresholdSource::Manual);
    }

    #[test]
    fn test_reference_row_overrides_defaults() {
        let config = AnalysisConfig::default();
        let reference = reference_table(vec![
            vec!["LFEF", "2.0", "1.0"],
            vec!["LFEE", "1.5", "0.8"],
        ]);

        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.thresholds.sustain(), 0.8);
        assert_eq!(resolved.thresholds.peak(), 1.5);
        assert_eq!(resolved.source, ThresholdSource::Reference);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_missing_sector_keeps_defaults_with_warning() {
        let config = AnalysisConfig::default();
        let reference = reference_table(vec![vec!["LFEF", "2.0", "1.0"]]);

        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.thresholds.sustain(), 0.6);
        assert_eq!(resolved.thresholds.peak(), 1.0);
        assert_eq!(resolved.source, ThresholdSource::Defaults);
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_malformed_reference_value_keeps_defaults_with_warning() {
        let config = AnalysisConfig::default();
        let reference = reference_table(vec![vec!["LFEE", "high", "0.8"]]);

        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.source, ThresholdSource::Defaults);
        assert_eq!(resolved.thresholds.peak(), 1.0);
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_out_of_range_reference_value_keeps_defaults_with_warning() {
        let config = AnalysisConfig::default();
        let reference = reference_table(vec![vec!["LFEE", "12.0", "0.8"]]);

        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.source, ThresholdSource::Defaults);
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_missing_identity_column_keeps_defaults_with_warning() {
        let config = AnalysisConfig::default();
        let reference = RawTable::new(
            vec!["Sector".to_string(), "PEAK 11".to_string()],
            vec![vec!["LFEE".to_string(), "1.5".to_string()]],
        );

        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.source, ThresholdSource::Defaults);
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_reference_without_threshold_columns_keeps_defaults_with_warning() {
        let config = AnalysisConfig::default();
        let reference = RawTable::new(
            vec!["Airspace".to_string(), "Remark".to_string()],
            vec![vec!["LFEE".to_string(), "seasonal".to_string()]],
        );

        let resolved =
            resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config).unwrap();
        assert_eq!(resolved.source, ThresholdSource::Defaults);
        assert_eq!(resolved.thresholds.sustain(), 0.6);
        assert_eq!(resolved.warnings.len(), 1);
    }

    #[test]
    fn test_equal_thresholds_halt_the_run() {
        let config = AnalysisConfig::default();
        let input = ThresholdInput::Manual {
            sustain: 1.0,
            peak: 1.0,
        };

        let err = resolve_thresholds(&input, None, "LFEE", &config).unwrap_err();
        assert!(matches!(err, AnalysisError::Threshold(_)));
    }

    #[test]
    fn test_inverted_reference_pair_halts_the_run() {
        let config = AnalysisConfig::default();
        let reference = reference_table(vec![vec!["LFEE", "0.5", "0.9"]]);

        let err = resolve_thresholds(&ThresholdInput::Auto, Some(&reference), "LFEE", &config)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Threshold(_)));
    }
}
