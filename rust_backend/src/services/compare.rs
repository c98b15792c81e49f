//! Day-level reconciliation of the hourly and minute series.
//!
//! The minute observations of the chosen date are resampled into hourly
//! buckets and projected onto the hourly unit, then joined against the
//! native hourly records to quantify how far the two views of the same
//! sector-day diverge.
//!
//! The projection is a rate projection, not a sum: the mean instantaneous
//! occupancy per minute is scaled by 60 into an hourly-equivalent rate.
//! Summing the 60 samples would double-count aircraft that stay in the
//! sector across consecutive minutes.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::algorithms::stats;
use crate::core::domain::{
    ClassifiedHourlySlot, ClassifiedMinuteSlot, MINUTES_PER_HOUR,
};
use crate::parsing::slot_labels;

/// One joined (date, hour) row of the comparison table.
///
/// Occupancy columns are in the hourly-equivalent unit. `deviation_pct` is
/// rounded to one decimal place and is NaN when the hourly load is zero or
/// when the hour has no minute observations; NaN rows are excluded from
/// gap flagging and from the summary statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyComparisonRow {
    pub hour: u32,
    pub load: f64,
    pub occ_mean_hourly: f64,
    pub occ_max_hourly: f64,
    pub occ_min_hourly: f64,
    pub deviation: f64,
    pub deviation_pct: f64,
}

/// Comparison table and derived figures for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayComparisonData {
    pub date: NaiveDate,
    pub rows: Vec<HourlyComparisonRow>,
    /// Rows whose absolute deviation percentage exceeds the gap threshold.
    pub significant_gaps: Vec<HourlyComparisonRow>,
    pub gap_threshold_pct: f64,
    pub mean_deviation: f64,
    pub max_deviation: f64,
    /// Pearson correlation between the load and projected-occupancy
    /// sequences. Informational only; `None` when undefined.
    pub correlation: Option<f64>,
}

/// Compute the hourly comparison for one date present in both series.
///
/// The join is left on the hourly rows: hours without minute observations
/// keep their load and get NaN occupancy columns.
pub fn compute_day_comparison(
    hourly: &[ClassifiedHourlySlot],
    minute: &[ClassifiedMinuteSlot],
    date: NaiveDate,
    gap_threshold_pct: f64,
) -> Result<DayComparisonData, String> {
    let day_hourly: Vec<&ClassifiedHourlySlot> =
        hourly.iter().filter(|slot| slot.date == date).collect();
    if day_hourly.is_empty() {
        return Err(format!("no hourly records for {}", date));
    }

    let mut occupation_by_hour: HashMap<u32, Vec<f64>> = HashMap::new();
    for slot in minute.iter().filter(|slot| slot.date == date) {
        if let Some(hour) = slot_labels::parse_time_hour(&slot.time) {
            occupation_by_hour.entry(hour).or_default().push(slot.occupation);
        }
    }
    if occupation_by_hour.is_empty() {
        return Err(format!("no minute records for {}", date));
    }

    let mut rows = Vec::with_capacity(day_hourly.len());
    for slot in &day_hourly {
        let (occ_mean_hourly, occ_max_hourly, occ_min_hourly) =
            match occupation_by_hour.get(&slot.hour) {
                Some(values) => {
                    let summary = stats::compute_summary(values);
                    (
                        summary.mean * MINUTES_PER_HOUR,
                        summary.max * MINUTES_PER_HOUR,
                        summary.min * MINUTES_PER_HOUR,
                    )
                }
                None => (f64::NAN, f64::NAN, f64::NAN),
            };

        let deviation = slot.load - occ_mean_hourly;
        let deviation_pct = if slot.load == 0.0 {
            f64::NAN
        } else {
            stats::round1(deviation / slot.load * 100.0)
        };

        rows.push(HourlyComparisonRow {
            hour: slot.hour,
            load: slot.load,
            occ_mean_hourly,
            occ_max_hourly,
            occ_min_hourly,
            deviation,
            deviation_pct,
        });
    }

    let significant_gaps: Vec<HourlyComparisonRow> = rows
        .iter()
        .filter(|row| row.deviation_pct.abs() > gap_threshold_pct)
        .cloned()
        .collect();

    let finite_deviations: Vec<f64> = rows
        .iter()
        .map(|row| row.deviation)
        .filter(|d| d.is_finite())
        .collect();
    let mean_deviation = if finite_deviations.is_empty() {
        f64::NAN
    } else {
        stats::mean(&finite_deviations)
    };
    let max_deviation = finite_deviations
        .iter()
        .copied()
        .fold(f64::NAN, f64::max);

    let loads: Vec<f64> = rows.iter().map(|row| row.load).collect();
    let occ_means: Vec<f64> = rows.iter().map(|row| row.occ_mean_hourly).collect();
    let correlation = stats::pearson_correlation(&loads, &occ_means);

    Ok(DayComparisonData {
        date,
        rows,
        significant_gaps,
        gap_threshold_pct,
        mean_deviation,
        max_deviation,
        correlation,
    })
}
