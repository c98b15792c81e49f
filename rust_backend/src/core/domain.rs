//! Domain models for traffic volume load and occupancy analysis.
//!
//! This module provides the core data structures that represent hourly load
//! records, minute occupancy records, classification thresholds, and the
//! classified time slots produced by an analysis run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Conversion factor between the minute unit (aircraft/minute) and the
/// hourly unit (aircraft/hour).
pub const MINUTES_PER_HOUR: f64 = 60.0;

/// Classification status of a single time slot.
///
/// Every observation is assigned exactly one status by comparing its value
/// against the thresholds expressed in the observation's native unit:
///
/// - [`Status::Peak`]: value at or above the PEAK threshold (inclusive)
/// - [`Status::UnderSustain`]: value strictly below the SUSTAIN threshold
/// - [`Status::Normal`]: everything in between, SUSTAIN boundary included
///
/// The boundary convention is load-bearing: values exactly equal to SUSTAIN
/// are `Normal`, values exactly equal to PEAK are `Peak`. Downstream counts
/// depend on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "PEAK")]
    Peak,
    #[serde(rename = "NORMAL")]
    Normal,
    #[serde(rename = "SOUS-SUSTAIN")]
    UnderSustain,
}

impl Status {
    /// Returns the display label used in reports and CSV exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Peak => "PEAK",
            Status::Normal => "NORMAL",
            Status::UnderSustain => "SOUS-SUSTAIN",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SUSTAIN and PEAK thresholds for one traffic volume, in aircraft/minute.
///
/// The invariant `sustain < peak` (strict) is enforced at construction and
/// the fields are immutable afterwards, so a `Thresholds` value handed to
/// the classifier is always valid. The hourly-unit view is derived exactly
/// by multiplying by 60, with no rounding before comparison.
///
/// # Examples
///
/// ```
/// use capa_rust::core::domain::{Status, Thresholds};
///
/// let thresholds = Thresholds::new(0.6, 1.0).unwrap();
/// assert_eq!(thresholds.sustain_hourly(), 36.0);
/// assert_eq!(thresholds.peak_hourly(), 60.0);
///
/// // Boundary semantics: equal to peak is PEAK, equal to sustain is NORMAL.
/// assert_eq!(thresholds.classify_occupation(1.0), Status::Peak);
/// assert_eq!(thresholds.classify_occupation(0.6), Status::Normal);
/// assert_eq!(thresholds.classify_occupation(0.5), Status::UnderSustain);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Thresholds {
    sustain: f64,
    peak: f64,
}

impl Thresholds {
    /// Creates a validated threshold pair (aircraft/minute).
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Threshold`] when `sustain >= peak`.
    ///
    /// # Examples
    ///
    /// ```
    /// use capa_rust::core::domain::Thresholds;
    ///
    /// assert!(Thresholds::new(0.6, 1.0).is_ok());
    /// assert!(Thresholds::new(1.0, 1.0).is_err());
    /// ```
    pub fn new(sustain: f64, peak: f64) -> Result<Self, AnalysisError> {
        if !(sustain < peak) {
            return Err(AnalysisError::Threshold(format!(
                "SUSTAIN ({}) must be strictly below PEAK ({})",
                sustain, peak
            )));
        }
        Ok(Self { sustain, peak })
    }

    /// SUSTAIN threshold in aircraft/minute.
    pub fn sustain(&self) -> f64 {
        self.sustain
    }

    /// PEAK threshold in aircraft/minute.
    pub fn peak(&self) -> f64 {
        self.peak
    }

    /// SUSTAIN threshold projected onto the hourly unit (aircraft/hour).
    pub fn sustain_hourly(&self) -> f64 {
        self.sustain * MINUTES_PER_HOUR
    }

    /// PEAK threshold projected onto the hourly unit (aircraft/hour).
    pub fn peak_hourly(&self) -> f64 {
        self.peak * MINUTES_PER_HOUR
    }

    /// Classifies an hourly load value using the hourly-unit thresholds.
    pub fn classify_load(&self, load: f64) -> Status {
        if load >= self.peak_hourly() {
            Status::Peak
        } else if load < self.sustain_hourly() {
            Status::UnderSustain
        } else {
            Status::Normal
        }
    }

    /// Classifies a minute occupancy value using the native minute-unit
    /// thresholds, with no scaling.
    pub fn classify_occupation(&self, occupation: f64) -> Status {
        if occupation >= self.peak {
            Status::Peak
        } else if occupation < self.sustain {
            Status::UnderSustain
        } else {
            Status::Normal
        }
    }
}

/// Where the operative thresholds came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThresholdSource {
    Defaults,
    Reference,
    Manual,
}

impl ThresholdSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThresholdSource::Defaults => "defaults",
            ThresholdSource::Reference => "reference_table",
            ThresholdSource::Manual => "manual",
        }
    }
}

/// One hourly aggregated load observation.
///
/// `hour` is derived from the slot label's integer prefix before `:`
/// (for example `"10:00-11:00"` yields hour 10).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyLoadRecord {
    pub date: NaiveDate,
    pub hour: u32,
    pub slot_label: String,
    pub load: f64,
}

/// One minute-by-minute occupancy observation.
///
/// `time` keeps the `"H:MM"` label extracted from the source column name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteOccupancyRecord {
    pub date: NaiveDate,
    pub time: String,
    pub occupation: f64,
}

/// Hourly load series for one traffic volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyLoadSeries {
    pub identity: String,
    pub records: Vec<HourlyLoadRecord>,
}

impl HourlyLoadSeries {
    /// Returns the sorted list of distinct dates covered by this series.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }
}

/// Minute occupancy series for one traffic volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinuteOccupancySeries {
    pub identity: String,
    pub records: Vec<MinuteOccupancyRecord>,
}

impl MinuteOccupancySeries {
    /// Returns the sorted list of distinct dates covered by this series.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.records.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();
        dates
    }
}

/// An hourly load observation together with its classification status.
///
/// Created once during classification and immutable afterwards; records are
/// only re-classified by re-running the analysis with different thresholds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedHourlySlot {
    pub date: NaiveDate,
    pub hour: u32,
    pub slot_label: String,
    pub load: f64,
    pub status: Status,
}

/// A minute occupancy observation together with its classification status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedMinuteSlot {
    pub date: NaiveDate,
    pub time: String,
    pub occupation: f64,
    pub status: Status,
}
