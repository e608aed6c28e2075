//! Weekly weight projection.
//!
//! Walks the calendar week by week from the start date, emitting one
//! checkpoint per week until the goal is reached or the safety cap is hit:
//! - Week 1 covers the partial week ending on the first Sunday
//! - Every later week is a full Monday..Sunday week
//! - The goal test uses the week's start weight, so the series can run one
//!   week past the goal

use crate::calendar::{days_before_week, resolve_start_at, week_range_from_start};
use crate::energy::{compute_net_calories, round_tenth, weight_change_over};
use crate::{ProjectionOutcome, ProjectionPlan, UserProfile, WeeklyProjection};
use chrono::{Local, NaiveDate, NaiveDateTime};

/// Upper bound on the number of weekly checkpoints (two years)
pub const MAX_PROJECTION_WEEKS: u32 = 104;

/// Direction the weight is moving in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trend {
    Losing,
    Gaining,
    Flat,
}

impl Trend {
    fn from_net_calories(net: f64) -> Self {
        if net < 0.0 {
            Trend::Losing
        } else if net > 0.0 {
            Trend::Gaining
        } else {
            Trend::Flat
        }
    }

    /// Whether a week starting at `start_weight` has reached the goal
    fn goal_reached(self, start_weight: f64, goal_weight: f64) -> bool {
        match self {
            Trend::Losing => start_weight <= goal_weight,
            Trend::Gaining => start_weight >= goal_weight,
            // No motion toward any goal; only the cap ends the series
            Trend::Flat => false,
        }
    }
}

/// Unrounded projected weight after `days` days
fn weight_after(profile: &UserProfile, net_calories: f64, days: i64) -> f64 {
    profile.weight + weight_change_over(net_calories, days as f64)
}

/// Build the weekly series for a known start date
pub fn project_from_start(profile: &UserProfile, start: NaiveDate) -> ProjectionPlan {
    let net_calories = compute_net_calories(profile);
    let trend = Trend::from_net_calories(net_calories);
    let mut weeks = Vec::new();

    tracing::debug!(
        "Projecting from {} at {:.1} lbs toward {:.1} lbs ({:.1} kcal/day, {:?})",
        start,
        profile.weight,
        profile.goal_weight,
        net_calories,
        trend
    );

    for week in 1..=MAX_PROJECTION_WEEKS {
        let range = week_range_from_start(start, week);
        let offset = days_before_week(start, week);
        let start_weight = round_tenth(weight_after(profile, net_calories, offset));
        let end_weight = round_tenth(weight_after(
            profile,
            net_calories,
            offset + i64::from(range.day_count()),
        ));

        weeks.push(WeeklyProjection {
            week,
            start_weight,
            end_weight,
            date: range.start_date,
        });

        // Week 1 always runs to completion before the goal is checked
        if week >= 2 && trend.goal_reached(start_weight, profile.goal_weight) {
            tracing::debug!("Goal {:.1} reached at week {}", profile.goal_weight, week);
            return ProjectionPlan {
                weeks,
                outcome: ProjectionOutcome::GoalReached { week },
            };
        }
    }

    tracing::debug!(
        "Goal {:.1} not reached within {} weeks",
        profile.goal_weight,
        MAX_PROJECTION_WEEKS
    );
    ProjectionPlan {
        weeks,
        outcome: ProjectionOutcome::CapReached,
    }
}

/// Weekly series plus outcome, falling back to `now` for a bad start date
pub fn project_weight_plan_at(profile: &UserProfile, now: NaiveDateTime) -> ProjectionPlan {
    project_from_start(profile, resolve_start_at(profile, now).date())
}

pub fn project_weight_plan(profile: &UserProfile) -> ProjectionPlan {
    project_weight_plan_at(profile, Local::now().naive_local())
}

/// Weekly weight checkpoints from the start date toward the goal
///
/// Never empty and never longer than [`MAX_PROJECTION_WEEKS`].
pub fn project_weight(profile: &UserProfile) -> Vec<WeeklyProjection> {
    project_weight_plan(profile).weeks
}

pub fn project_weight_at(profile: &UserProfile, now: NaiveDateTime) -> Vec<WeeklyProjection> {
    project_weight_plan_at(profile, now).weeks
}
