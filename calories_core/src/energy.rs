//! Daily energy balance and the calorie-to-pound conversion.

use crate::bmr::compute_bmr;
use crate::UserProfile;

/// Calories per pound of body weight
pub const CALORIES_PER_POUND: f64 = 3500.0;

/// Net daily calories: intake minus (BMR + exercise)
///
/// Negative means a deficit (weight loss). Not rounded.
pub fn compute_net_calories(profile: &UserProfile) -> f64 {
    profile.calories_eaten - total_calories_burned(profile)
}

/// Total calories burned per day (BMR + exercise)
pub fn total_calories_burned(profile: &UserProfile) -> f64 {
    compute_bmr(profile) as f64 + profile.calories_burned_exercise
}

/// Projected weight change in pounds over `days` days
pub fn weight_change_over(net_calories_per_day: f64, days: f64) -> f64 {
    net_calories_per_day * days / CALORIES_PER_POUND
}

/// Round a weight to one decimal place for output
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Gender;

    fn profile(eaten: f64, exercise: f64) -> UserProfile {
        UserProfile {
            age: 30,
            weight: 180.0,
            height_feet: 5,
            height_inches: 10,
            gender: Gender::Male,
            calories_eaten: eaten,
            calories_burned_exercise: exercise,
            start_date: "2024-01-10".into(),
            goal_weight: 170.0,
            daily_goals: vec![],
        }
    }

    #[test]
    fn test_net_calories_is_exact() {
        let p = profile(2000.5, 300.25);
        let expected = 2000.5 - 1783.0 - 300.25;
        assert_eq!(compute_net_calories(&p), expected);
    }

    #[test]
    fn test_surplus_is_positive() {
        assert!(compute_net_calories(&profile(3000.0, 0.0)) > 0.0);
        assert!(compute_net_calories(&profile(1500.0, 200.0)) < 0.0);
    }

    #[test]
    fn test_total_burned() {
        assert_eq!(total_calories_burned(&profile(2000.0, 300.0)), 2083.0);
    }

    #[test]
    fn test_weight_change() {
        assert_eq!(weight_change_over(-500.0, 7.0), -1.0);
        assert_eq!(weight_change_over(0.0, 7.0), 0.0);
    }

    #[test]
    fn test_round_tenth() {
        assert_eq!(round_tenth(199.04), 199.0);
        assert_eq!(round_tenth(199.06), 199.1);
        assert_eq!(round_tenth(180.0), 180.0);
    }
}
