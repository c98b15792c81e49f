//! Capacity analysis backend for traffic volume data.
//!
//! Classifies hourly load and minute occupancy series of one airspace
//! sector against SUSTAIN/PEAK thresholds and reconciles the two
//! granularities. The interactive presentation layer is external and
//! consumes the computed tables through the [`api`] module.

pub mod core;
pub mod parsing;
pub mod preprocessing;
pub mod algorithms;
pub mod services;
pub mod io;
pub mod api;
pub mod config;
pub mod error;
