//! Service layer for classification and aggregation.
//!
//! Services are pure `compute_*` functions over already-extracted series.
//! Each reporting view of the external UI shell has one service producing
//! its data container: overview statistics, per-day detail, and the
//! hourly-versus-minute day comparison.

pub mod classification;
pub mod compare;
pub mod daily;
pub mod overview;

pub use classification::{classify_hourly_series, classify_minute_series};
pub use compare::{compute_day_comparison, DayComparisonData, HourlyComparisonRow};
pub use daily::{compute_day_detail, DayDetailData};
pub use overview::{compute_overview_data, OverviewData, SeriesOverview, StatusCounts};
