//! Core domain types
//!
//! This module contains the domain structures shared across the CropLens
//! client crates: background jobs and their progress, sensor readings, and
//! the aggregated analytics shapes rendered by the dashboard.

pub mod analytics;
pub mod job;
pub mod reading;
