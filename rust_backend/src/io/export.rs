//! CSV export of classified series.
//!
//! One flat file per series, with a header row. File names are derived
//! from the sector identity and a date, so exporting the same analysis on
//! the same day always produces the same names.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::core::domain::{ClassifiedHourlySlot, ClassifiedMinuteSlot};
use crate::preprocessing::pipeline::AnalysisData;

/// File name for the hourly analysis export, e.g.
/// `load_analysis_LFEE_20240101.csv`.
pub fn hourly_export_file_name(identity: &str, date: NaiveDate) -> String {
    format!("load_analysis_{}_{}.csv", identity, date.format("%Y%m%d"))
}

/// File name for the minute analysis export, e.g.
/// `occ_analysis_LFEE_20240101.csv`.
pub fn minute_export_file_name(identity: &str, date: NaiveDate) -> String {
    format!("occ_analysis_{}_{}.csv", identity, date.format("%Y%m%d"))
}

/// Render the classified hourly series as CSV text with a header row.
pub fn hourly_analysis_csv(slots: &[ClassifiedHourlySlot]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Date", "Hour", "Slot", "Load", "Status"])
        .context("Failed to write CSV header")?;

    for slot in slots {
        writer
            .write_record([
                slot.date.format("%Y-%m-%d").to_string(),
                slot.hour.to_string(),
                slot.slot_label.clone(),
                slot.load.to_string(),
                slot.status.as_str().to_string(),
            ])
            .context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Render the classified minute series as CSV text with a header row.
pub fn minute_analysis_csv(slots: &[ClassifiedMinuteSlot]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Date", "Time", "Occupation", "Status"])
        .context("Failed to write CSV header")?;

    for slot in slots {
        writer
            .write_record([
                slot.date.format("%Y-%m-%d").to_string(),
                slot.time.clone(),
                slot.occupation.to_string(),
                slot.status.as_str().to_string(),
            ])
            .context("Failed to write CSV row")?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush CSV writer: {}", e))?;
    String::from_utf8(bytes).context("CSV output was not valid UTF-8")
}

/// Write both analysis exports into `dir`, named for the given date.
///
/// Returns the two file paths (hourly, minute).
pub fn write_analysis_files(
    dir: &Path,
    data: &AnalysisData,
    date: NaiveDate,
) -> Result<(PathBuf, PathBuf)> {
    let hourly_path = dir.join(hourly_export_file_name(&data.identity, date));
    let minute_path = dir.join(minute_export_file_name(&data.identity, date));

    std::fs::write(&hourly_path, hourly_analysis_csv(&data.hourly)?)
        .with_context(|| format!("Failed to write {}", hourly_path.display()))?;
    std::fs::write(&minute_path, minute_analysis_csv(&data.minute)?)
        .with_context(|| format!("Failed to write {}", minute_path.display()))?;

    Ok((hourly_path, minute_path))
}

/// Write both analysis exports named for the current local date.
pub fn write_analysis_files_today(dir: &Path, data: &AnalysisData) -> Result<(PathBuf, PathBuf)> {
    write_analysis_files(dir, data, chrono::Local::now().date_naive())
}
