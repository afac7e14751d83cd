//! Whole-resource projection: every week from 1 to completion in one pass.
//!
//! The same recurring weekly availability is replayed each week, and one
//! cursor runs across all weeks so content is never reordered or repeated.
//!
//! # Algorithm
//!
//! 1. `total = Σ section minutes` (missing estimates use the configured default).
//! 2. `total_weeks = max(1, ceil(total / weekly_minutes))`, with a zero,
//!    negative or non-finite `weekly_minutes` replaced by 1.
//! 3. For each week, walk the sorted slots and let the cursor assign the
//!    current section to each until the resource is exhausted.
//! 4. After each week, `completion = min(100, round(credited / total * 100))`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::cursor::SectionCursor;
use crate::model::{
    focus_area, AvailabilitySlot, MultiWeekPlanResult, Section, WeekPlan, WeeklyPlan,
};
use crate::ordering::sort_slots;
use crate::progress::completion_percentage;
use crate::week::{estimated_completion_date, week_start_date};

/// Input to [`generate_multi_week_plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiWeekRequest {
    pub goal_id: String,
    pub sections: Vec<Section>,
    /// One recurring week of availability.
    pub slots: Vec<AvailabilitySlot>,
    pub weekly_hours: f64,
    pub start_date: NaiveDate,
}

/// Project the whole resource onto weekly plans using the default config.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use study_planner::{generate_multi_week_plan, AvailabilitySlot, MultiWeekRequest, Section};
///
/// let request = MultiWeekRequest {
///     goal_id: "goal-1".into(),
///     sections: vec![Section::new("A", Some(60), 0), Section::new("B", Some(30), 1)],
///     slots: vec![
///         AvailabilitySlot::new("Monday", "18:00", "18:30", 30),
///         AvailabilitySlot::new("Wednesday", "18:00", "18:30", 30),
///     ],
///     weekly_hours: 1.0,
///     start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
/// };
/// let result = generate_multi_week_plan(&request);
/// assert_eq!(result.total_weeks, 2);
/// assert_eq!(result.weeks[0].plan.completion_percentage, 67);
/// assert_eq!(result.weeks[1].plan.completion_percentage, 100);
/// ```
pub fn generate_multi_week_plan(request: &MultiWeekRequest) -> MultiWeekPlanResult {
    generate_multi_week_plan_with_config(request, &PlannerConfig::default())
}

/// Project the whole resource onto weekly plans.
pub fn generate_multi_week_plan_with_config(
    request: &MultiWeekRequest,
    config: &PlannerConfig,
) -> MultiWeekPlanResult {
    let mut sections: Vec<&Section> = request.sections.iter().collect();
    sections.sort_by_key(|s| s.order_index);

    let total_minutes: u64 = sections.iter().map(|s| u64::from(s.minutes(config))).sum();
    let total_weeks = total_weeks(total_minutes, request.weekly_hours);
    let slots = sort_slots(&request.slots);

    tracing::debug!(
        goal_id = %request.goal_id,
        sections = sections.len(),
        slots = slots.len(),
        total_minutes,
        total_weeks,
        "generating multi-week plan"
    );

    let mut cursor = SectionCursor::new(sections, config);
    let mut credited: u64 = 0;
    let mut weeks = Vec::new();

    for week_number in 1..=total_weeks {
        let mut sessions = Vec::new();
        for slot in &slots {
            let Some(allocation) = cursor.assign(slot) else {
                break;
            };
            credited += u64::from(allocation.credited_minutes);
            sessions.push(allocation.session);
        }

        let plan = WeeklyPlan {
            goal_id: request.goal_id.clone(),
            week_number,
            week_start_date: week_start_date(request.start_date, week_number),
            focus_area: focus_area(&sessions, &config.empty_focus_area),
            total_minutes: sessions.iter().map(|s| s.duration_minutes).sum(),
            completion_percentage: completion_percentage(credited, total_minutes),
        };
        weeks.push(WeekPlan { plan, sessions });
    }

    MultiWeekPlanResult {
        total_weeks,
        estimated_completion_date: estimated_completion_date(request.start_date, total_weeks),
        weeks,
    }
}

/// `max(1, ceil(total_minutes / weekly_minutes))`.
fn total_weeks(total_minutes: u64, weekly_hours: f64) -> u32 {
    let weekly_minutes = weekly_hours * 60.0;
    let weekly_minutes = if weekly_minutes.is_finite() && weekly_minutes > 0.0 {
        weekly_minutes
    } else {
        1.0
    };
    let weeks = (total_minutes as f64 / weekly_minutes).ceil();
    if weeks < 1.0 {
        1
    } else if weeks >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        weeks as u32
    }
}
