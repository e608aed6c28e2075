//! Resting energy expenditure (BMR).
//!
//! Mifflin-St Jeor: `10 * kg + 6.25 * cm - 5 * age + s`, where `s` is +5
//! for males and -161 for females. Inputs are taken in pounds and
//! feet/inches and are not range-checked.

use crate::{Gender, UserProfile};

/// Pounds to kilograms
pub const KG_PER_POUND: f64 = 0.453592;

/// Inches to centimeters
pub const CM_PER_INCH: f64 = 2.54;

pub fn weight_kg(profile: &UserProfile) -> f64 {
    profile.weight * KG_PER_POUND
}

pub fn height_cm(profile: &UserProfile) -> f64 {
    let inches = profile.height_feet * 12 + profile.height_inches;
    f64::from(inches) * CM_PER_INCH
}

fn gender_modifier(gender: Gender) -> f64 {
    match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
    }
}

/// Compute BMR in whole kcal/day
///
/// Rounds half away from zero.
pub fn compute_bmr(profile: &UserProfile) -> i64 {
    let base = 10.0 * weight_kg(profile) + 6.25 * height_cm(profile) - 5.0 * f64::from(profile.age);
    (base + gender_modifier(profile.gender)).round() as i64
}
