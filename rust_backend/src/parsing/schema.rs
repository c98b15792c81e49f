//! Schema adapter: raw tables into typed load and occupancy series.
//!
//! Both input layouts share a leading identity column and a date column;
//! value columns are recognized by their name grammar. Missing structural
//! columns fail the run with a schema error, and any value cell that does
//! not parse as a finite number fails it with a data error, so no partially
//! classified output can ever be produced from a malformed table.

use chrono::NaiveDate;

use crate::core::domain::{
    HourlyLoadRecord, HourlyLoadSeries, MinuteOccupancyRecord, MinuteOccupancySeries,
};
use crate::error::{AnalysisError, AnalysisResult};
use crate::parsing::slot_labels;
use crate::parsing::table::RawTable;

/// Name of the sector identity column in both input tables.
pub const IDENTITY_COLUMN: &str = "ID";

/// Name of the date column in both input tables.
pub const DATE_COLUMN: &str = "Date";

/// Extracts the hourly load series from a raw LOAD table.
///
/// Value columns are those whose name contains both a colon and a hyphen,
/// e.g. `"10:00-11:00"`. The sector identity is read from the first data
/// row. Records are emitted row by row, one per (date, slot column), in
/// input order.
pub fn extract_hourly_series(table: &RawTable) -> AnalysisResult<HourlyLoadSeries> {
    let (identity_idx, date_idx) = required_columns(table, "hourly load")?;

    let slot_columns: Vec<(usize, &str, u32)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| slot_labels::is_hour_slot_label(name))
        .map(|(idx, name)| {
            slot_labels::parse_hour_slot(name)
                .map(|hour| (idx, name.as_str(), hour))
                .ok_or_else(|| {
                    AnalysisError::Schema(format!(
                        "hourly load column '{}' has no valid starting hour",
                        name
                    ))
                })
        })
        .collect::<AnalysisResult<_>>()?;

    if slot_columns.is_empty() {
        return Err(AnalysisError::Schema(
            "hourly load table has no slot columns (expected names like '10:00-11:00')"
                .to_string(),
        ));
    }

    let identity = extract_identity(table, identity_idx, "hourly load")?;

    let mut records = Vec::with_capacity(table.height() * slot_columns.len());
    for row in 0..table.height() {
        let date = parse_date_cell(table, row, date_idx)?;
        for &(col, slot_label, hour) in &slot_columns {
            let load = parse_value_cell(table, row, col, slot_label)?;
            records.push(HourlyLoadRecord {
                date,
                hour,
                slot_label: slot_label.to_string(),
                load,
            });
        }
    }

    Ok(HourlyLoadSeries { identity, records })
}

/// Extracts the minute occupancy series from a raw OCC table.
///
/// Value columns are those whose name contains the duration marker; the
/// `"H:MM"` time label is the text before the first `" - "` separator.
pub fn extract_minute_series(table: &RawTable) -> AnalysisResult<MinuteOccupancySeries> {
    let (identity_idx, date_idx) = required_columns(table, "minute occupancy")?;

    let minute_columns: Vec<(usize, &str, &str)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(_, name)| slot_labels::is_minute_column_label(name))
        .map(|(idx, name)| {
            slot_labels::parse_minute_label(name)
                .map(|time| (idx, name.as_str(), time))
                .ok_or_else(|| {
                    AnalysisError::Schema(format!(
                        "minute occupancy column '{}' has no valid time label",
                        name
                    ))
                })
        })
        .collect::<AnalysisResult<_>>()?;

    if minute_columns.is_empty() {
        return Err(AnalysisError::Schema(
            "minute occupancy table has no occupancy columns (expected the \
             'Duration 11 Min' marker in column names)"
                .to_string(),
        ));
    }

    let identity = extract_identity(table, identity_idx, "minute occupancy")?;

    let mut records = Vec::with_capacity(table.height() * minute_columns.len());
    for row in 0..table.height() {
        let date = parse_date_cell(table, row, date_idx)?;
        for &(col, name, time) in &minute_columns {
            let occupation = parse_value_cell(table, row, col, name)?;
            records.push(MinuteOccupancyRecord {
                date,
                time: time.to_string(),
                occupation,
            });
        }
    }

    Ok(MinuteOccupancySeries { identity, records })
}

fn required_columns(table: &RawTable, kind: &str) -> AnalysisResult<(usize, usize)> {
    let identity_idx = table.column_index(IDENTITY_COLUMN).ok_or_else(|| {
        AnalysisError::Schema(format!(
            "{} table is missing the required '{}' column",
            kind, IDENTITY_COLUMN
        ))
    })?;
    let date_idx = table.column_index(DATE_COLUMN).ok_or_else(|| {
        AnalysisError::Schema(format!(
            "{} table is missing the required '{}' column",
            kind, DATE_COLUMN
        ))
    })?;
    Ok((identity_idx, date_idx))
}

fn extract_identity(table: &RawTable, identity_idx: usize, kind: &str) -> AnalysisResult<String> {
    let identity = table
        .cell(0, identity_idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            AnalysisError::Schema(format!("{} table has no identity value in its first row", kind))
        })?;
    Ok(identity.to_string())
}

fn parse_date_cell(table: &RawTable, row: usize, date_idx: usize) -> AnalysisResult<NaiveDate> {
    let cell = table.cell(row, date_idx).unwrap_or("").trim();
    NaiveDate::parse_from_str(cell, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(cell, "%d/%m/%Y"))
        .map_err(|_| {
            AnalysisError::Data(format!("row {}: '{}' is not a valid date", row, cell))
        })
}

fn parse_value_cell(
    table: &RawTable,
    row: usize,
    col: usize,
    column_name: &str,
) -> AnalysisResult<f64> {
    let cell = table.cell(row, col).unwrap_or("").trim();
    let value: f64 = cell.parse().map_err(|_| {
        AnalysisError::Data(format!(
            "column '{}' row {}: '{}' is not numeric",
            column_name, row, cell
        ))
    })?;
    if !value.is_finite() {
        return Err(AnalysisError::Data(format!(
            "column '{}' row {}: '{}' is not a finite number",
            column_name, row, cell
        )));
    }
    Ok(value)
}
