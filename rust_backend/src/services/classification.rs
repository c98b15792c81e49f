//! Per-record threshold classification of the two series.
//!
//! Both functions are pure and order-preserving: the output has exactly one
//! classified slot per input record, in input order. Each series is
//! classified against the thresholds expressed in its own unit; the unit
//! projection lives on [`Thresholds`] so no scaling happens here.

use crate::core::domain::{
    ClassifiedHourlySlot, ClassifiedMinuteSlot, HourlyLoadRecord, MinuteOccupancyRecord,
    Thresholds,
};

/// Classifies every hourly load record against the hourly-unit thresholds.
pub fn classify_hourly_series(
    records: &[HourlyLoadRecord],
    thresholds: &Thresholds,
) -> Vec<ClassifiedHourlySlot> {
    records
        .iter()
        .map(|record| ClassifiedHourlySlot {
            date: record.date,
            hour: record.hour,
            slot_label: record.slot_label.clone(),
            load: record.load,
            status: thresholds.classify_load(record.load),
        })
        .collect()
}

/// Classifies every minute occupancy record against the native minute-unit
/// thresholds.
pub fn classify_minute_series(
    records: &[MinuteOccupancyRecord],
    thresholds: &Thresholds,
) -> Vec<ClassifiedMinuteSlot> {
    records
        .iter()
        .map(|record| ClassifiedMinuteSlot {
            date: record.date,
            time: record.time.clone(),
            occupation: record.occupation,
            status: thresholds.classify_occupation(record.occupation),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Status;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn hourly(hour: u32, load: f64) -> HourlyLoadRecord {
        HourlyLoadRecord {
            date: date(),
            hour,
            slot_label: format!("{}:00-{}:00", hour, hour + 1),
            load,
        }
    }

    fn minute(time: &str, occupation: f64) -> MinuteOccupancyRecord {
        MinuteOccupancyRecord {
            date: date(),
            time: time.to_string(),
            occupation,
        }
    }

    #[test]
    fn test_hourly_classification_uses_hourly_thresholds() {
        let thresholds = Thresholds::new(0.6, 1.0).unwrap();
        // hourly thresholds are 36 and 60
        let records = vec![hourly(9, 70.0), hourly(10, 48.0), hourly(11, 12.0)];

        let classified = classify_hourly_series(&records, &thresholds);
        assert_eq!(classified.len(), 3);
        assert_eq!(classified[0].status, Status::Peak);
        assert_eq!(classified[1].status, Status::Normal);
        assert_eq!(classified[2].status, Status::UnderSustain);
        // slots keep their input order and payload
        assert_eq!(classified[0].hour, 9);
        assert_eq!(classified[0].load, 70.0);
    }

    #[test]
    fn test_minute_classification_uses_native_thresholds() {
        let thresholds = Thresholds::new(0.6, 1.0).unwrap();
        let records = vec![
            minute("10:00", 1.3),
            minute("10:01", 0.8),
            minute("10:02", 0.5),
        ];

        let classified = classify_minute_series(&records, &thresholds);
        assert_eq!(classified[0].status, Status::Peak);
        assert_eq!(classified[1].status, Status::Normal);
        assert_eq!(classified[2].status, Status::UnderSustain);
    }

    #[test]
    fn test_boundary_values() {
        let thresholds = Thresholds::new(0.6, 1.0).unwrap();

        // occupation exactly at peak is PEAK
        let at_peak = classify_minute_series(&[minute("10:00", 1.0)], &thresholds);
        assert_eq!(at_peak[0].status, Status::Peak);

        // occupation exactly at sustain is NORMAL, not SOUS-SUSTAIN
        let at_sustain = classify_minute_series(&[minute("10:00", 0.6)], &thresholds);
        assert_eq!(at_sustain[0].status, Status::Normal);

        // the same convention holds in the hourly unit
        let at_peak_hourly = classify_hourly_series(&[hourly(10, 60.0)], &thresholds);
        assert_eq!(at_peak_hourly[0].status, Status::Peak);
        let at_sustain_hourly = classify_hourly_series(&[hourly(10, 36.0)], &thresholds);
        assert_eq!(at_sustain_hourly[0].status, Status::Normal);
    }

    proptest! {
        // the three statuses partition the value axis: exactly one matches
        // any observation, whatever the thresholds
        #[test]
        fn prop_status_partition(
            value in 0.0f64..500.0,
            sustain in 0.01f64..5.0,
            gap in 0.01f64..5.0,
        ) {
            let peak = sustain + gap;
            let thresholds = Thresholds::new(sustain, peak).unwrap();

            match thresholds.classify_occupation(value) {
                Status::Peak => prop_assert!(value >= peak),
                Status::UnderSustain => prop_assert!(value < sustain),
                Status::Normal => prop_assert!(value >= sustain && value < peak),
            }
        }

        #[test]
        fn prop_classification_is_one_to_one(loads in proptest::collection::vec(0.0f64..200.0, 0..50)) {
            let thresholds = Thresholds::new(0.6, 1.0).unwrap();
            let records: Vec<HourlyLoadRecord> = loads
                .iter()
                .enumerate()
                .map(|(i, &load)| HourlyLoadRecord {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                    hour: (i % 24) as u32,
                    slot_label: String::new(),
                    load,
                })
                .collect();

            let classified = classify_hourly_series(&records, &thresholds);
            prop_assert_eq!(classified.len(), records.len());
            for (record, slot) in records.iter().zip(&classified) {
                prop_assert_eq!(record.load, slot.load);
            }
        }
    }
}
