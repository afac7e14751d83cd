//! Week arithmetic over plan start dates.
//!
//! Weeks are 1-based and always seven days long, counted from the plan's own
//! start date rather than a calendar week boundary. Nothing here reads the
//! system clock: callers pass "today" (or a UTC anchor plus a timezone).

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{PlannerError, Result};

/// The week that contains `today`, for a plan starting on `start`.
///
/// `max(1, floor(days_since(start) / 7) + 1)`, so a start date in the future
/// still reports week 1.
///
/// ```
/// use chrono::NaiveDate;
/// use study_planner::week::current_week_number;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
/// assert_eq!(current_week_number(start, today), 3);
/// ```
pub fn current_week_number(start: NaiveDate, today: NaiveDate) -> u32 {
    let days = (today - start).num_days();
    let week = days.div_euclid(7) + 1;
    week.clamp(1, u32::MAX as i64) as u32
}

/// [`current_week_number`] with "today" taken as the local date of `anchor`
/// in the IANA zone `timezone`.
///
/// # Errors
///
/// Returns [`PlannerError::InvalidTimezone`] if `timezone` is not a valid
/// IANA name.
pub fn current_week_number_at(
    start: NaiveDate,
    anchor: DateTime<Utc>,
    timezone: &str,
) -> Result<u32> {
    let tz = parse_timezone(timezone)?;
    let today = anchor.with_timezone(&tz).date_naive();
    Ok(current_week_number(start, today))
}

/// First day of week `week_number`: `start + (week_number - 1) * 7` days.
///
/// Saturates at [`NaiveDate::MAX`] (or [`NaiveDate::MIN`] for week 0 of a
/// plan starting at the minimum date).
pub fn week_start_date(start: NaiveDate, week_number: u32) -> NaiveDate {
    match week_number.checked_sub(1) {
        Some(weeks) => add_weeks(start, weeks),
        None => start.checked_sub_days(Days::new(7)).unwrap_or(NaiveDate::MIN),
    }
}

/// Day after the last planned week: `start + total_weeks * 7` days.
/// Saturates at [`NaiveDate::MAX`].
pub fn estimated_completion_date(start: NaiveDate, total_weeks: u32) -> NaiveDate {
    add_weeks(start, total_weeks)
}

fn add_weeks(start: NaiveDate, weeks: u32) -> NaiveDate {
    start
        .checked_add_days(Days::new(u64::from(weeks) * 7))
        .unwrap_or(NaiveDate::MAX)
}

/// Parse an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns [`PlannerError::InvalidDate`] if the string is not a valid date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| PlannerError::InvalidDate(format!("'{}': {}", s.trim(), e)))
}

fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| PlannerError::InvalidTimezone(format!("'{s}'")))
}
