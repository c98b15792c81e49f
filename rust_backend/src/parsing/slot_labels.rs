//! Column-name grammars for the two input table layouts.
//!
//! Hourly load columns are named like `"10:00-11:00"`; minute occupancy
//! columns are named like `"10:05 - LFEE Duration 11 Min"`. These labels
//! carry the time axis of each series, so the string handling is kept here
//! as small, unit-tested parsers instead of ad-hoc slicing at call sites.

/// Marker substring identifying a per-minute occupancy column.
pub const MINUTE_COLUMN_MARKER: &str = "Duration 11 Min";

/// Separator between the time label and the rest of a minute column name.
const MINUTE_LABEL_SEPARATOR: &str = " - ";

/// Returns `true` when a column name looks like an hourly slot column
/// (contains both a colon and a hyphen).
pub fn is_hour_slot_label(name: &str) -> bool {
    name.contains(':') && name.contains('-')
}

/// Parses the starting hour out of an hourly slot label.
///
/// The hour is the integer prefix before the first `:` and must lie in
/// `0..=23`. Returns `None` for anything else.
///
/// # Examples
///
/// ```
/// use capa_rust::parsing::slot_labels::parse_hour_slot;
///
/// assert_eq!(parse_hour_slot("10:00-11:00"), Some(10));
/// assert_eq!(parse_hour_slot("0:00-1:00"), Some(0));
/// assert_eq!(parse_hour_slot("24:00-25:00"), None);
/// assert_eq!(parse_hour_slot("Date"), None);
/// ```
pub fn parse_hour_slot(label: &str) -> Option<u32> {
    let prefix = label.split(':').next()?;
    let hour: u32 = prefix.trim().parse().ok()?;
    if hour <= 23 {
        Some(hour)
    } else {
        None
    }
}

/// Returns `true` when a column name is a minute occupancy column.
pub fn is_minute_column_label(name: &str) -> bool {
    name.contains(MINUTE_COLUMN_MARKER)
}

/// Extracts the `"H:MM"` time label from a minute column name.
///
/// The label is the text preceding the first `" - "` separator. It must
/// parse as an hour in `0..=23` and a two-digit minute in `0..=59`.
pub fn parse_minute_label(name: &str) -> Option<&str> {
    let label = name.split(MINUTE_LABEL_SEPARATOR).next()?.trim();
    let (hour, minute) = label.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    if hour > 23 || minute.len() != 2 {
        return None;
    }
    let minute: u32 = minute.parse().ok()?;
    if minute > 59 {
        return None;
    }
    Some(label)
}

/// Parses the hour-of-day prefix of an `"H:MM"` time label.
///
/// Used when resampling minute observations into hourly buckets.
pub fn parse_time_hour(time: &str) -> Option<u32> {
    let prefix = time.split(':').next()?;
    let hour: u32 = prefix.trim().parse().ok()?;
    if hour <= 23 {
        Some(hour)
    } else {
        None
    }
}
