//! Whole-dataset overview statistics.
//!
//! Tallies the classification statuses of each series and derives the
//! percentage splits shown in the overview page and its distribution
//! charts. The two series are tallied independently: hourly percentages
//! are over days x 24 slots, minute percentages over days x 1440
//! observations, and the denominators are never pooled.

use serde::Serialize;

use crate::algorithms::stats;
use crate::core::domain::{ClassifiedHourlySlot, ClassifiedMinuteSlot, Status, Thresholds};

/// Status tally of one series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub peak: usize,
    pub normal: usize,
    pub under_sustain: usize,
}

impl StatusCounts {
    fn tally<I: IntoIterator<Item = Status>>(statuses: I) -> Self {
        let mut counts = StatusCounts::default();
        for status in statuses {
            match status {
                Status::Peak => counts.peak += 1,
                Status::Normal => counts.normal += 1,
                Status::UnderSustain => counts.under_sustain += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.peak + self.normal + self.under_sustain
    }
}

/// Overview of one classified series: counts, percentage split and the
/// mean observed value in the series' native unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesOverview {
    pub counts: StatusCounts,
    pub total: usize,
    pub peak_pct: f64,
    pub normal_pct: f64,
    pub under_sustain_pct: f64,
    pub mean_value: f64,
}

impl SeriesOverview {
    fn from_counts(counts: StatusCounts, mean_value: f64) -> Self {
        let total = counts.total();
        let pct = |count: usize| {
            if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            }
        };
        Self {
            total,
            peak_pct: pct(counts.peak),
            normal_pct: pct(counts.normal),
            under_sustain_pct: pct(counts.under_sustain),
            mean_value,
            counts,
        }
    }
}

/// Theoretical capacity figures derived from the hourly series and the
/// PEAK threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityOverview {
    /// Maximum hourly capacity, i.e. the PEAK threshold in aircraft/hour.
    pub max_capacity_hourly: f64,
    pub mean_load: f64,
    /// Mean load as a percentage of the maximum capacity.
    pub utilization_pct: f64,
    /// Remaining headroom in aircraft/hour.
    pub margin_hourly: f64,
}

/// Overview data for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewData {
    pub hourly: SeriesOverview,
    pub minute: SeriesOverview,
    pub capacity: CapacityOverview,
}

/// Compute the whole-dataset overview for both classified series.
pub fn compute_overview_data(
    hourly: &[ClassifiedHourlySlot],
    minute: &[ClassifiedMinuteSlot],
    thresholds: &Thresholds,
) -> OverviewData {
    let hourly_counts = StatusCounts::tally(hourly.iter().map(|slot| slot.status));
    let minute_counts = StatusCounts::tally(minute.iter().map(|slot| slot.status));

    let loads: Vec<f64> = hourly.iter().map(|slot| slot.load).collect();
    let occupations: Vec<f64> = minute.iter().map(|slot| slot.occupation).collect();

    let mean_load = stats::mean(&loads);
    let peak_hourly = thresholds.peak_hourly();

    let capacity = CapacityOverview {
        max_capacity_hourly: peak_hourly,
        mean_load,
        utilization_pct: if peak_hourly > 0.0 {
            mean_load / peak_hourly * 100.0
        } else {
            0.0
        },
        margin_hourly: peak_hourly - mean_load,
    };

    OverviewData {
        hourly: SeriesOverview::from_counts(hourly_counts, mean_load),
        minute: SeriesOverview::from_counts(minute_counts, stats::mean(&occupations)),
        capacity,
    }
}
