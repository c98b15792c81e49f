//! Core domain models for traffic volume capacity analysis.
//!
//! This module defines the fundamental data structures used throughout the
//! system, representing load and occupancy observations, classification
//! thresholds, and classified time slots.

pub mod domain;
