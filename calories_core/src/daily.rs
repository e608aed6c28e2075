//! Day-by-day expansion of a single projected week.
//!
//! Each week is derived from the profile's base weight and the number of
//! days elapsed before it, never from a running total, so any week can be
//! expanded on its own.

use crate::calendar::{day_name, days_before_week, resolve_start_at, week_range_from_start};
use crate::energy::{compute_net_calories, round_tenth, weight_change_over};
use crate::{DailyProjection, UserProfile};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Expand `week_number` of a series starting on `start`
///
/// Each entry is the projected weight at the start of that day.
pub fn project_daily_from_start(
    profile: &UserProfile,
    start: NaiveDate,
    week_number: u32,
) -> Vec<DailyProjection> {
    let daily_change = weight_change_over(compute_net_calories(profile), 1.0);
    let range = week_range_from_start(start, week_number);
    let offset = days_before_week(start, week_number);

    let mut current_weight = profile.weight + daily_change * offset as f64;
    let mut days = Vec::with_capacity(range.day_count() as usize);

    for (index, date) in range.dates().enumerate() {
        days.push(DailyProjection {
            day: index as u32,
            weight: round_tenth(current_weight),
            date,
            day_name: day_name(date).to_string(),
        });
        current_weight += daily_change;
    }

    tracing::debug!(
        "Expanded week {} ({}) into {} days",
        week_number,
        range,
        days.len()
    );
    days
}

/// Daily weights for one week, falling back to `now` for a bad start date
pub fn project_daily_at(
    profile: &UserProfile,
    week_number: u32,
    now: NaiveDateTime,
) -> Vec<DailyProjection> {
    project_daily_from_start(profile, resolve_start_at(profile, now).date(), week_number)
}

/// Daily weights for one week
pub fn project_daily(profile: &UserProfile, week_number: u32) -> Vec<DailyProjection> {
    project_daily_at(profile, week_number, Local::now().naive_local())
}
