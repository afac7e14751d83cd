//! Regenerate one week's plan against that week's concrete availability.
//!
//! Two passes over the sorted slots:
//!
//! 1. **Carryover**: unfinished sessions from the previous week claim the
//!    earliest slots, one each, keeping their topic and activities.
//! 2. **New content**: the remaining slots are filled from the sections not
//!    yet completed, starting fresh at the first of them.
//!
//! Completion is left at 0; the caller recomputes it from every session of
//! the goal (see [`crate::progress::planned_completion_percentage`]).

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::cursor::{pending_sections, SectionCursor};
use crate::model::{focus_area, AvailabilitySlot, PlanSession, Resource, WeekPlan, WeeklyPlan};
use crate::ordering::sort_slots;

/// Input to [`generate_week_plan`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRequest {
    pub goal_id: String,
    pub week_number: u32,
    pub week_start_date: NaiveDate,
    /// This week's availability.
    pub slots: Vec<AvailabilitySlot>,
    pub resource: Resource,
    #[serde(default)]
    pub completed_section_titles: BTreeSet<String>,
    /// Sessions carried over from the previous week, in the order they
    /// should be rescheduled.
    #[serde(default)]
    pub carryover: Vec<PlanSession>,
}

/// Build one week's plan using the default config.
///
/// Carried-over sessions take the earliest slots in weekday/start-time
/// order, then the remaining slots are filled from the first section not
/// listed in `completed_section_titles`. `completion_percentage` is 0.
pub fn generate_week_plan(request: &WeekRequest) -> WeekPlan {
    generate_week_plan_with_config(request, &PlannerConfig::default())
}

/// Build one week's plan. See [`generate_week_plan`].
///
/// Topics and activities of carried-over sessions are copied verbatim; their
/// day, time and duration come from the slot they land in.
pub fn generate_week_plan_with_config(request: &WeekRequest, config: &PlannerConfig) -> WeekPlan {
    let slots = sort_slots(&request.slots);
    let carried = request.carryover.len().min(slots.len());

    let mut sessions: Vec<PlanSession> = slots
        .iter()
        .zip(&request.carryover)
        .map(|(slot, previous)| {
            PlanSession::for_slot(slot, previous.topic.clone(), previous.activities.clone())
        })
        .collect();

    let pending = pending_sections(&request.resource.sections, &request.completed_section_titles);
    let mut cursor = SectionCursor::new(pending, config);
    for slot in &slots[carried..] {
        let Some(allocation) = cursor.assign(slot) else {
            break;
        };
        sessions.push(allocation.session);
    }

    tracing::debug!(
        goal_id = %request.goal_id,
        week_number = request.week_number,
        slots = slots.len(),
        carried,
        new_sessions = sessions.len() - carried,
        "generated week plan"
    );

    let plan = WeeklyPlan {
        goal_id: request.goal_id.clone(),
        week_number: request.week_number,
        week_start_date: request.week_start_date,
        focus_area: focus_area(&sessions, &config.empty_focus_area),
        total_minutes: sessions.iter().map(|s| s.duration_minutes).sum(),
        completion_percentage: 0,
    };
    WeekPlan { plan, sessions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Section, SessionStatus};

    fn resource() -> Resource {
        Resource {
            title: "Rust Book".into(),
            sections: vec![
                Section::new("A", Some(60), 0).with_topics(["a1", "a2"]),
                Section::new("B", Some(30), 1),
                Section::new("C", Some(30), 2),
            ],
        }
    }

    fn slots() -> Vec<AvailabilitySlot> {
        vec![
            AvailabilitySlot::new("Friday", "10:00", "10:30", 30),
            AvailabilitySlot::new("Monday", "10:00", "10:30", 30),
            AvailabilitySlot::new("Wednesday", "10:00", "10:30", 30),
        ]
    }

    fn request() -> WeekRequest {
        WeekRequest {
            goal_id: "goal-1".into(),
            week_number: 3,
            week_start_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            slots: slots(),
            resource: resource(),
            completed_section_titles: BTreeSet::new(),
            carryover: Vec::new(),
        }
    }

    fn carried(topic: &str, activities: &[&str]) -> PlanSession {
        PlanSession {
            day_of_week: "Tuesday".into(),
            start_time: "07:00".into(),
            end_time: "07:45".into(),
            duration_minutes: 45,
            topic: topic.into(),
            activities: activities.iter().map(|a| a.to_string()).collect(),
            status: SessionStatus::Missed,
        }
    }

    #[test]
    fn test_fresh_week_fills_from_first_section() {
        let week = generate_week_plan(&request());
        let topics: Vec<_> = week.sessions.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["A", "A", "B"]);
        assert_eq!(week.sessions[0].day_of_week, "Monday");
        assert_eq!(week.sessions[0].activities, vec!["a1", "a2"]);
        assert_eq!(week.sessions[2].activities, vec!["Study B"]);
        assert_eq!(week.plan.week_number, 3);
        assert_eq!(week.plan.total_minutes, 90);
        assert_eq!(week.plan.completion_percentage, 0);
        assert_eq!(week.plan.focus_area, "A, B");
        assert!(week.sessions.iter().all(|s| s.status == SessionStatus::Pending));
    }

    #[test]
    fn test_completed_sections_skipped() {
        let mut req = request();
        req.completed_section_titles.insert("A".into());
        let week = generate_week_plan(&req);
        let topics: Vec<_> = week.sessions.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["B", "C"]);
        assert_eq!(week.plan.total_minutes, 60);
    }

    #[test]
    fn test_carryover_takes_earliest_slots() {
        let mut req = request();
        req.carryover = vec![carried("X", &["review x"]), carried("Y", &["review y"])];
        let week = generate_week_plan(&req);

        assert_eq!(week.sessions.len(), 3);
        assert_eq!(week.sessions[0].topic, "X");
        assert_eq!(week.sessions[0].activities, vec!["review x"]);
        assert_eq!(week.sessions[0].day_of_week, "Monday");
        // Timing comes from the new slot, not the carried session.
        assert_eq!(week.sessions[0].duration_minutes, 30);
        assert_eq!(week.sessions[0].start_time, "10:00");
        assert_eq!(week.sessions[0].status, SessionStatus::Pending);
        assert_eq!(week.sessions[1].topic, "Y");
        assert_eq!(week.sessions[2].topic, "A");
        assert_eq!(week.plan.focus_area, "X, Y, A");
    }

    #[test]
    fn test_carryover_exceeding_slots() {
        let mut req = request();
        req.carryover = (0..5).map(|i| carried(&format!("X{i}"), &["r"])).collect();
        let week = generate_week_plan(&req);
        let topics: Vec<_> = week.sessions.iter().map(|s| s.topic.as_str()).collect();
        assert_eq!(topics, vec!["X0", "X1", "X2"]);
    }

    #[test]
    fn test_no_slots_gives_empty_week() {
        let mut req = request();
        req.slots.clear();
        req.carryover = vec![carried("X", &["r"])];
        let week = generate_week_plan(&req);
        assert!(week.sessions.is_empty());
        assert_eq!(week.plan.focus_area, "Getting Started");
        assert_eq!(week.plan.total_minutes, 0);
    }

    #[test]
    fn test_all_completed_leaves_slots_empty() {
        let mut req = request();
        req.completed_section_titles = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let week = generate_week_plan(&req);
        assert!(week.sessions.is_empty());
    }
}
