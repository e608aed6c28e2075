//! Week boundaries.
//!
//! Week 1 runs from the profile's start date through the first Sunday on or
//! after it (1 to 7 days). Every later week is a full Monday..Sunday week.
//! All helpers here are pure functions of their date arguments; "now" only
//! enters through the explicit fallback used when a start date is unusable.

use crate::{UserProfile, WeekRange};
use chrono::{DateTime, Datelike, Days, Local, NaiveDate, NaiveDateTime};

/// Weekday names, Sunday first
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// English weekday name for a date
pub fn day_name(date: NaiveDate) -> &'static str {
    DAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

/// The same date if it is a Sunday, otherwise the next Sunday
pub fn sunday_of(date: NaiveDate) -> NaiveDate {
    let weekday = u64::from(date.weekday().num_days_from_sunday());
    if weekday == 0 {
        date
    } else {
        add_days_saturating(date, 7 - weekday)
    }
}

/// The first Monday strictly after `date`
pub fn next_monday_after(date: NaiveDate) -> NaiveDate {
    let weekday = u64::from(date.weekday().num_days_from_sunday());
    if weekday == 0 {
        add_days_saturating(date, 1)
    } else {
        add_days_saturating(date, 8 - weekday)
    }
}

/// `date + days`, clamped to the last representable date
fn add_days_saturating(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days))
        .unwrap_or(NaiveDate::MAX)
}

/// Number of days in week 1 (start date through its Sunday, inclusive)
pub fn first_week_day_count(start: NaiveDate) -> u32 {
    ((sunday_of(start) - start).num_days() + 1) as u32
}

/// Parse a stored start date
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamp and
/// RFC 3339. Offsets are dropped and the wall-clock time is kept.
pub fn parse_start_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Resolve the profile's start date, substituting `now` when it is unusable
pub fn resolve_start_at(profile: &UserProfile, now: NaiveDateTime) -> NaiveDateTime {
    match parse_start_date(&profile.start_date) {
        Some(start) => start,
        None => {
            tracing::warn!(
                "Invalid start date {:?}, using current date {}",
                profile.start_date,
                now.date()
            );
            now
        }
    }
}

/// Resolve the profile's start date against the local clock
pub fn resolve_start(profile: &UserProfile) -> NaiveDateTime {
    resolve_start_at(profile, Local::now().naive_local())
}

/// Date range of `week_number` for a series starting on `start`
///
/// Week numbers below 1 are treated as week 1. Weeks past the end of the
/// calendar clamp to `NaiveDate::MAX`.
pub fn week_range_from_start(start: NaiveDate, week_number: u32) -> WeekRange {
    if week_number <= 1 {
        return WeekRange {
            start_date: start,
            end_date: sunday_of(start),
        };
    }

    let first_monday = next_monday_after(start);
    let week_start = add_days_saturating(first_monday, 7 * u64::from(week_number - 2));
    WeekRange {
        start_date: week_start,
        end_date: add_days_saturating(week_start, 6),
    }
}

/// Date range owned by `week_number`, falling back to `now` for a bad start date
pub fn resolve_week_range_at(
    profile: &UserProfile,
    week_number: u32,
    now: NaiveDateTime,
) -> WeekRange {
    week_range_from_start(resolve_start_at(profile, now).date(), week_number)
}

/// Date range owned by `week_number`
pub fn resolve_week_range(profile: &UserProfile, week_number: u32) -> WeekRange {
    resolve_week_range_at(profile, week_number, Local::now().naive_local())
}

/// Days elapsed between the series start and the first day of `week_number`
pub fn days_before_week(start: NaiveDate, week_number: u32) -> i64 {
    (week_range_from_start(start, week_number).start_date - start).num_days()
}

/// Week index containing `date`, or `None` if it precedes `start`
pub fn week_number_from_start(start: NaiveDate, date: NaiveDate) -> Option<u32> {
    if date < start {
        return None;
    }
    if date <= sunday_of(start) {
        return Some(1);
    }
    let since_monday = (date - next_monday_after(start)).num_days();
    Some(2 + (since_monday / 7) as u32)
}

/// Week index containing `date` for this profile
pub fn week_number_for_date_at(
    profile: &UserProfile,
    date: NaiveDate,
    now: NaiveDateTime,
) -> Option<u32> {
    week_number_from_start(resolve_start_at(profile, now).date(), date)
}

pub fn week_number_for_date(profile: &UserProfile, date: NaiveDate) -> Option<u32> {
    week_number_for_date_at(profile, date, Local::now().naive_local())
}
