//! Core domain types for the Just Calories system.
//!
//! This module defines the value types shared by the engine and the stores:
//! - The user profile the projections are derived from
//! - Weekly and daily projection checkpoints
//! - Week date ranges
//! - User-entered actual measurements

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex used by the BMR formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(crate::Error::Profile(format!("Unknown gender: {}", other))),
        }
    }
}

/// Everything the projection engine needs to know about the user.
///
/// Weights are pounds, calories are kcal/day. `start_date` is kept as the
/// string the user entered; it is parsed (with a fallback to today) every
/// time a projection is computed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub age: i32,
    pub weight: f64,
    pub height_feet: i32,
    pub height_inches: i32,
    pub gender: Gender,
    pub calories_eaten: f64,
    pub calories_burned_exercise: f64,
    #[serde(default)]
    pub start_date: String,
    pub goal_weight: f64,
    /// Labels the user checks off each day
    #[serde(default)]
    pub daily_goals: Vec<String>,
}

// ============================================================================
// Projection Types
// ============================================================================

/// One weekly checkpoint of the projected weight trajectory
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeeklyProjection {
    /// 1-based week index
    pub week: u32,
    pub start_weight: f64,
    pub end_weight: f64,
    /// First day of the week (equals `WeekRange::start_date`)
    pub date: NaiveDate,
}

/// One day of an expanded week
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DailyProjection {
    /// 0-based index within the week
    pub day: u32,
    pub weight: f64,
    pub date: NaiveDate,
    pub day_name: String,
}

/// How a weekly projection series ended
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProjectionOutcome {
    /// The start weight of `week` reached the goal
    GoalReached { week: u32 },
    /// The safety cap stopped the series before the goal was reached
    CapReached,
}

/// Weekly series together with its outcome
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectionPlan {
    pub weeks: Vec<WeeklyProjection>,
    pub outcome: ProjectionOutcome,
}

impl ProjectionPlan {
    pub fn goal_reachable(&self) -> bool {
        matches!(self.outcome, ProjectionOutcome::GoalReached { .. })
    }
}

/// Inclusive date range owned by one week index
///
/// Serializes both ends as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeekRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl WeekRange {
    /// Inclusive number of days in the range
    pub fn day_count(&self) -> u32 {
        ((self.end_date - self.start_date).num_days() + 1).max(0) as u32
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Iterate every date in the range, start to end
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        std::iter::successors(Some(self.start_date), |d| d.succ_opt())
            .take_while(move |d| *d <= end)
    }
}

impl fmt::Display for WeekRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}

// ============================================================================
// Measurement Types
// ============================================================================

/// User-entered actuals for one calendar day
///
/// Every field except the date is optional so that partial entries can be
/// merged into whatever is already stored for that day.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MeasurementRecord {
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_eaten: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned_exercise: Option<f64>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub completed_goals: BTreeSet<String>,
}

impl MeasurementRecord {
    /// Empty record for a date
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    /// Merge `other` into `self`; fields set in `other` win
    pub fn merge(&mut self, other: MeasurementRecord) {
        if other.weight.is_some() {
            self.weight = other.weight;
        }
        if other.calories_eaten.is_some() {
            self.calories_eaten = other.calories_eaten;
        }
        if other.calories_burned_exercise.is_some() {
            self.calories_burned_exercise = other.calories_burned_exercise;
        }
        if !other.completed_goals.is_empty() {
            self.completed_goals = other.completed_goals;
        }
    }
}
