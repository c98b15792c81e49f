//! Parsers for raw tabular capacity data.
//!
//! This module turns already-parsed tabular input (column names plus string
//! cells) into the typed load and occupancy series the rest of the system
//! works with.
//!
//! # Parsers
//!
//! - [`table`]: the in-memory [`RawTable`] boundary type
//! - [`slot_labels`]: column-name grammars for hour slots and minute columns
//! - [`schema`]: schema adapter extracting identity, dates and value columns
//!
//! # Example
//!
//! ```
//! use capa_rust::parsing::schema::extract_hourly_series;
//! use capa_rust::parsing::RawTable;
//!
//! let table = RawTable::new(
//!     vec!["ID".into(), "Date".into(), "10:00-11:00".into()],
//!     vec![vec!["LFEE".into(), "2024-01-01".into(), "48".into()]],
//! );
//! let series = extract_hourly_series(&table).expect("valid hourly table");
//! assert_eq!(series.identity, "LFEE");
//! ```

pub mod slot_labels;
pub mod schema;
pub mod table;


pub use table::RawTable;
