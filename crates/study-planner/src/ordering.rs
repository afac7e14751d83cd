//! Deterministic weekly ordering of availability slots.
//!
//! Slots are ordered Monday through Sunday, then by start time. Start times
//! are zero-padded `HH:MM`, so plain string comparison gives clock order.
//!
//! Sorting is lenient: an unrecognized day name sorts as Monday. Callers that
//! want to reject such input run [`validate_slots`] first.

use std::cmp::Ordering;

use chrono::{NaiveTime, Weekday};

use crate::error::{PlannerError, Result};
use crate::model::AvailabilitySlot;

/// Map a weekday name (case-insensitive, full or abbreviated) to [`Weekday`].
fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.trim().to_lowercase().as_str() {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Strict weekday parsing.
///
/// # Errors
///
/// Returns [`PlannerError::UnknownWeekday`] for anything that is not one of
/// the seven day names or their common abbreviations.
pub fn parse_weekday(name: &str) -> Result<Weekday> {
    weekday_from_name(name).ok_or_else(|| PlannerError::UnknownWeekday(format!("'{name}'")))
}

/// Position of `name` in the week, Monday = 0 through Sunday = 6.
/// Unknown names map to 0.
pub fn day_index(name: &str) -> u32 {
    weekday_from_name(name)
        .map(|d| d.num_days_from_monday())
        .unwrap_or(0)
}

/// Weekday first, then start time.
pub fn compare_slots(a: &AvailabilitySlot, b: &AvailabilitySlot) -> Ordering {
    day_index(&a.day)
        .cmp(&day_index(&b.day))
        .then_with(|| a.start_time.cmp(&b.start_time))
}

/// A sorted copy of `slots`. The sort is stable, so slots with equal keys
/// keep their input order.
pub fn sort_slots(slots: &[AvailabilitySlot]) -> Vec<AvailabilitySlot> {
    let mut sorted = slots.to_vec();
    sorted.sort_by(compare_slots);
    sorted
}

/// Parse a wall-clock time: `"HH:MM"` or `"HH:MM:SS"`.
///
/// # Errors
///
/// Returns [`PlannerError::InvalidTime`] if the string is neither form.
pub fn parse_clock_time(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .map_err(|e| PlannerError::InvalidTime(format!("'{s}': {e}")))
}

/// Reject slots the lenient generators would silently absorb: unknown day
/// names, unparseable times and zero durations.
///
/// # Errors
///
/// Returns the first problem found, as [`PlannerError::UnknownWeekday`],
/// [`PlannerError::InvalidTime`] or [`PlannerError::InvalidSlot`].
pub fn validate_slots(slots: &[AvailabilitySlot]) -> Result<()> {
    for slot in slots {
        parse_weekday(&slot.day)?;
        parse_clock_time(&slot.start_time)?;
        parse_clock_time(&slot.end_time)?;
        if slot.duration_minutes == 0 {
            return Err(PlannerError::InvalidSlot(format!(
                "{} {}-{}: duration must be positive",
                slot.day, slot.start_time, slot.end_time
            )));
        }
    }
    Ok(())
}
