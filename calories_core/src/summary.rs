//! Overview numbers and projected-vs-actual comparison.

use crate::bmr::compute_bmr;
use crate::calendar::{resolve_start_at, week_number_from_start, week_range_from_start};
use crate::energy::{compute_net_calories, total_calories_burned, CALORIES_PER_POUND};
use crate::measurements::most_recent_weight_in;
use crate::{MeasurementRecord, UserProfile, WeekRange, WeeklyProjection};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Headline figures for a profile and its weekly series
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProgressSummary {
    pub bmr: i64,
    pub total_burned: f64,
    pub net_calories: f64,
    pub pounds_per_day: f64,
    /// Days needed to move one pound; 0 when net calories are 0
    pub days_per_pound: f64,
    pub weight_to_go: f64,
    /// Date of the last weekly checkpoint
    pub expected_end_date: Option<NaiveDate>,
    /// Week containing `now`, if it is part of the series
    pub current_week: Option<u32>,
    /// Calories of deficit/surplus accumulated since the start
    pub calories_banked: f64,
    /// `calories_banked` against the calories needed to reach the goal, in [0, 1]
    pub calorie_progress: f64,
}

impl ProgressSummary {
    pub fn compute(
        profile: &UserProfile,
        weeks: &[WeeklyProjection],
        now: NaiveDateTime,
    ) -> Self {
        let start = resolve_start_at(profile, now);
        let net_calories = compute_net_calories(profile);
        let pounds_per_day = net_calories / CALORIES_PER_POUND;
        let days_per_pound = if pounds_per_day != 0.0 {
            1.0 / pounds_per_day.abs()
        } else {
            0.0
        };

        let weight_to_go = profile.weight - profile.goal_weight;
        let days_since_start = ((now - start).num_seconds() as f64 / 86_400.0).max(0.0);
        let calories_banked = net_calories.abs() * days_since_start;
        let calories_needed = weight_to_go * CALORIES_PER_POUND;
        let calorie_progress = if calories_needed > 0.0 {
            (calories_banked / calories_needed).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let current_week = week_number_from_start(start.date(), now.date())
            .filter(|week| weeks.iter().any(|w| w.week == *week));

        Self {
            bmr: compute_bmr(profile),
            total_burned: total_calories_burned(profile),
            net_calories,
            pounds_per_day,
            days_per_pound,
            weight_to_go,
            expected_end_date: weeks.last().map(|w| w.date),
            current_week,
            calories_banked,
            calorie_progress,
        }
    }
}

/// One weekly checkpoint alongside what the user actually logged
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WeekComparison {
    pub projection: WeeklyProjection,
    pub range: WeekRange,
    /// Latest logged weight inside the week
    pub actual_weight: Option<f64>,
    /// `actual_weight - end_weight`
    pub difference: Option<f64>,
    pub is_current: bool,
}

/// Pair each weekly checkpoint with the latest actual weight in its range
pub fn compare_weeks(
    start: NaiveDate,
    weeks: &[WeeklyProjection],
    records: &[MeasurementRecord],
    today: NaiveDate,
) -> Vec<WeekComparison> {
    weeks
        .iter()
        .map(|w| {
            let range = week_range_from_start(start, w.week);
            let actual_weight = most_recent_weight_in(records, range.start_date, range.end_date);
            WeekComparison {
                projection: w.clone(),
                range,
                actual_weight,
                difference: actual_weight.map(|a| a - w.end_weight),
                is_current: range.contains(today),
            }
        })
        .collect()
}
