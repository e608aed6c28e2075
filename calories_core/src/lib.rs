#![forbid(unsafe_code)]

//! Core domain model and projection engine for Just Calories.
//!
//! This crate provides:
//! - Domain types (profile, projections, week ranges, measurements)
//! - BMR and energy balance arithmetic
//! - Week boundary resolution
//! - Weekly and daily weight projections
//! - Persistence (profile and measurement stores)
//! - Overview summary and CSV export

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod bmr;
pub mod energy;
pub mod calendar;
pub mod projection;
pub mod daily;
pub mod storage;
pub mod profile_store;
pub mod measurements;
pub mod summary;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use bmr::compute_bmr;
pub use energy::compute_net_calories;
pub use calendar::{resolve_week_range, week_number_for_date};
pub use projection::{project_weight, project_weight_plan, MAX_PROJECTION_WEEKS};
pub use daily::project_daily;
pub use profile_store::ProfileStore;
pub use measurements::MeasurementStore;
pub use summary::{compare_weeks, ProgressSummary, WeekComparison};
