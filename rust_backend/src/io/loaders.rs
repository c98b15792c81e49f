//! CSV file loading into raw tables.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::AnalysisWarning;
use crate::parsing::table::RawTable;

/// Unified interface for loading tabular input files.
pub struct TableLoader;

impl TableLoader {
    /// Load a `;`-separated LOAD or OCC export into a raw table.
    pub fn load_semicolon_csv(path: &Path) -> Result<RawTable> {
        Self::load_csv(path, b';')
    }

    /// Load the optional reference threshold table.
    ///
    /// Reference tables circulate in both `;` and `,` separated form, so
    /// the delimiter is sniffed from the header line.
    pub fn load_reference_table(path: &Path) -> Result<RawTable> {
        let delimiter = Self::sniff_delimiter(path)?;
        Self::load_csv(path, delimiter)
    }

    /// Load the reference table, downgrading any failure to a warning.
    ///
    /// The reference table is an optional input: a missing or unreadable
    /// file must not stop an analysis run, so the failure comes back as a
    /// [`AnalysisWarning::ReferenceLookup`] next to `None` and the caller
    /// proceeds with default or explicit thresholds.
    pub fn load_reference_table_or_warn(
        path: &Path,
    ) -> (Option<RawTable>, Option<AnalysisWarning>) {
        match Self::load_reference_table(path) {
            Ok(table) => (Some(table), None),
            Err(e) => {
                log::warn!("Ignoring reference table {}: {:#}", path.display(), e);
                (
                    None,
                    Some(AnalysisWarning::ReferenceLookup(format!(
                        "reference table {} could not be read, keeping defaults",
                        path.display()
                    ))),
                )
            }
        }
    }

    /// Load a delimited text file into a raw table.
    pub fn load_csv(path: &Path, delimiter: u8) -> Result<RawTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;

        let columns: Vec<String> = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .iter()
            .map(String::from)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .with_context(|| format!("Failed to read a row of {}", path.display()))?;
            rows.push(record.iter().map(String::from).collect());
        }

        Ok(RawTable::new(columns, rows))
    }

    fn sniff_delimiter(path: &Path) -> Result<u8> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut header = String::new();
        BufReader::new(file)
            .read_line(&mut header)
            .with_context(|| format!("Failed to read header of {}", path.display()))?;

        if header.contains(';') {
            Ok(b';')
        } else {
            Ok(b',')
        }
    }
}
