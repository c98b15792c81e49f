//! Per-day detail statistics.
//!
//! Slices both classified series down to one date and computes the figures
//! shown on the daily view: the load peak and its hour, the occupancy peak
//! and its time, and the day's total load.

use chrono::NaiveDate;
use serde::Serialize;

use crate::core::domain::{ClassifiedHourlySlot, ClassifiedMinuteSlot};

/// Detail data for one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetailData {
    pub date: NaiveDate,
    pub hourly: Vec<ClassifiedHourlySlot>,
    pub minute: Vec<ClassifiedMinuteSlot>,
    pub peak_load: f64,
    /// Hour at which the load peak occurs (first hour on ties).
    pub peak_load_hour: u32,
    pub peak_occupation: f64,
    /// Time label at which the occupancy peak occurs (first on ties).
    pub peak_occupation_time: String,
    pub total_load: f64,
}

/// Compute the daily detail for one date present in both series.
pub fn compute_day_detail(
    hourly: &[ClassifiedHourlySlot],
    minute: &[ClassifiedMinuteSlot],
    date: NaiveDate,
) -> Result<DayDetailData, String> {
    let day_hourly: Vec<ClassifiedHourlySlot> = hourly
        .iter()
        .filter(|slot| slot.date == date)
        .cloned()
        .collect();
    if day_hourly.is_empty() {
        return Err(format!("no hourly records for {}", date));
    }

    let day_minute: Vec<ClassifiedMinuteSlot> = minute
        .iter()
        .filter(|slot| slot.date == date)
        .cloned()
        .collect();
    if day_minute.is_empty() {
        return Err(format!("no minute records for {}", date));
    }

    let mut peak_load = f64::MIN;
    let mut peak_load_hour = 0;
    for slot in &day_hourly {
        if slot.load > peak_load {
            peak_load = slot.load;
            peak_load_hour = slot.hour;
        }
    }

    let mut peak_occupation = f64::MIN;
    let mut peak_occupation_time = String::new();
    for slot in &day_minute {
        if slot.occupation > peak_occupation {
            peak_occupation = slot.occupation;
            peak_occupation_time = slot.time.clone();
        }
    }

    let total_load: f64 = day_hourly.iter().map(|slot| slot.load).sum();

    Ok(DayDetailData {
        date,
        peak_load,
        peak_load_hour,
        peak_occupation,
        peak_occupation_time,
        total_load,
        hourly: day_hourly,
        minute: day_minute,
    })
}
