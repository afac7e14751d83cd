//! Plain data types exchanged with the generators.
//!
//! Everything here is created fresh per call. The engine keeps no state
//! between invocations; prior progress arrives through [`SessionRecord`]s,
//! carried-over [`PlanSession`]s and completed section titles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::error::{PlannerError, Result};
use crate::ordering::parse_clock_time;

// ── Content ─────────────────────────────────────────────────────────────────

/// One ordered unit of learning content. `title` is its stable identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub topics: Vec<String>,
    pub order_index: i32,
}

impl Section {
    pub fn new(title: impl Into<String>, estimated_minutes: Option<u32>, order_index: i32) -> Self {
        Self {
            title: title.into(),
            estimated_minutes,
            topics: Vec::new(),
            order_index,
        }
    }

    pub fn with_topics<I, S>(mut self, topics: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.topics = topics.into_iter().map(Into::into).collect();
        self
    }

    /// Estimated minutes, falling back to the configured default when absent.
    pub fn minutes(&self, config: &PlannerConfig) -> u32 {
        self.estimated_minutes
            .unwrap_or(config.default_section_minutes)
    }

    /// Activities for a session covering this section: the first
    /// `max_activities` topics, or a single `"Study <title>"` entry.
    pub fn activities(&self, config: &PlannerConfig) -> Vec<String> {
        if self.topics.is_empty() {
            return vec![format!("Study {}", self.title)];
        }
        self.topics
            .iter()
            .take(config.max_activities.max(1))
            .cloned()
            .collect()
    }
}

/// A study resource broken into ordered sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

// ── Availability ────────────────────────────────────────────────────────────

/// A weekly time window the user has pledged to study.
///
/// `start_time`/`end_time` are zero-padded `HH:MM` wall-clock strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
}

impl AvailabilitySlot {
    pub fn new(
        day: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
        duration_minutes: u32,
    ) -> Self {
        Self {
            day: day.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            duration_minutes,
        }
    }

    /// Build a slot whose duration is derived from its wall-clock bounds.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidTime`] if either time cannot be parsed,
    /// or [`PlannerError::InvalidSlot`] if `end_time` is not after `start_time`.
    pub fn from_times(day: &str, start_time: &str, end_time: &str) -> Result<Self> {
        let start = parse_clock_time(start_time)?;
        let end = parse_clock_time(end_time)?;
        let minutes = (end - start).num_minutes();
        if minutes <= 0 {
            return Err(PlannerError::InvalidSlot(format!(
                "{day} {start_time}-{end_time}: end must be after start"
            )));
        }
        Ok(Self::new(day, start_time, end_time, minutes as u32))
    }
}

// ── Sessions ────────────────────────────────────────────────────────────────

/// Lifecycle of a session. The engine only ever emits [`SessionStatus::Pending`];
/// every later transition belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Missed,
}

impl SessionStatus {
    /// Whether moving from `self` to `next` is a legal lifecycle step.
    ///
    /// `pending -> in_progress -> completed`, either of the first two may be
    /// diverted to `missed`, and a missed session may be re-planned as pending.
    pub fn can_transition_to(self, next: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, next),
            (Pending, InProgress)
                | (Pending, Missed)
                | (InProgress, Completed)
                | (InProgress, Missed)
                | (Missed, Pending)
        )
    }

    pub fn is_completed(self) -> bool {
        self == SessionStatus::Completed
    }
}

/// One section's content assigned to one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSession {
    pub day_of_week: String,
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: u32,
    /// Title of the section assigned to this slot.
    pub topic: String,
    pub activities: Vec<String>,
    #[serde(default)]
    pub status: SessionStatus,
}

impl PlanSession {
    /// A pending session occupying `slot` with the given content.
    pub fn for_slot(slot: &AvailabilitySlot, topic: String, activities: Vec<String>) -> Self {
        Self {
            day_of_week: slot.day.clone(),
            start_time: slot.start_time.clone(),
            end_time: slot.end_time.clone(),
            duration_minutes: slot.duration_minutes,
            topic,
            activities,
            status: SessionStatus::Pending,
        }
    }
}

/// The minimum a caller must supply about a historical session for the
/// incremental generator to locate its cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub topic: String,
    pub duration_minutes: u32,
}

impl From<&PlanSession> for SessionRecord {
    fn from(session: &PlanSession) -> Self {
        Self {
            topic: session.topic.clone(),
            duration_minutes: session.duration_minutes,
        }
    }
}

// ── Plans ───────────────────────────────────────────────────────────────────

/// Summary of one week of a goal's plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub goal_id: String,
    /// 1-based.
    pub week_number: u32,
    pub week_start_date: NaiveDate,
    /// Distinct section titles touched this week, comma-joined.
    pub focus_area: String,
    pub total_minutes: u32,
    /// Cumulative across the resource, 0-100. Only the multi-week generator
    /// fills this in; the other generators leave it at 0 for the caller.
    pub completion_percentage: u8,
}

/// A week summary paired with its sessions in slot order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub plan: WeeklyPlan,
    pub sessions: Vec<PlanSession>,
}

/// Output of the multi-week generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiWeekPlanResult {
    pub total_weeks: u32,
    pub estimated_completion_date: NaiveDate,
    pub weeks: Vec<WeekPlan>,
}

/// Distinct topics of `sessions` in first-seen order, joined with `", "`,
/// or `empty_label` when there are none.
pub(crate) fn focus_area(sessions: &[PlanSession], empty_label: &str) -> String {
    let mut seen: Vec<&str> = Vec::new();
    for session in sessions {
        if !seen.contains(&session.topic.as_str()) {
            seen.push(&session.topic);
        }
    }
    if seen.is_empty() {
        empty_label.to_string()
    } else {
        seen.join(", ")
    }
}
