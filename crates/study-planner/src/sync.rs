//! Incremental slot sync: plan only the slots a user just added.
//!
//! The rest of the week is already planned and must not move, so instead of
//! regenerating we work out where allocation stands from the sessions that
//! already exist and continue from there. No cursor is ever stored; it is
//! rebuilt from history on every call.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::cursor::{pending_sections, CursorPosition, SectionCursor};
use crate::model::{AvailabilitySlot, PlanSession, Resource, Section, SessionRecord};
use crate::ordering::sort_slots;

/// Input to [`generate_slot_sync`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotSyncRequest {
    /// Only the newly added slots.
    pub new_slots: Vec<AvailabilitySlot>,
    pub resource: Resource,
    #[serde(default)]
    pub completed_section_titles: BTreeSet<String>,
    /// Every existing session for the goal, across all weeks.
    #[serde(default)]
    pub existing_sessions: Vec<SessionRecord>,
}

/// Sessions for the new slots, plus the distinct sections they cover in
/// first-assigned order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSyncResult {
    pub sessions: Vec<PlanSession>,
    pub assigned_sections: Vec<String>,
}

/// Locate the allocation cursor within `pending` (non-completed sections in
/// `order_index` order) from the minutes already scheduled per topic.
///
/// The cursor lands on the first section whose scheduled time is below its
/// estimate, with `remaining_minutes = estimate - scheduled`. When every
/// section is fully scheduled it pins to the last one with zero remaining.
/// Returns `None` when `pending` is empty.
pub fn reconstruct_cursor(
    pending: &[&Section],
    records: &[SessionRecord],
    config: &PlannerConfig,
) -> Option<CursorPosition> {
    let mut spent: HashMap<&str, u64> = HashMap::new();
    for record in records {
        *spent.entry(record.topic.as_str()).or_default() += u64::from(record.duration_minutes);
    }

    for (section_index, section) in pending.iter().enumerate() {
        let estimate = section.minutes(config);
        let used = spent.get(section.title.as_str()).copied().unwrap_or(0);
        if used < u64::from(estimate) {
            return Some(CursorPosition {
                section_index,
                remaining_minutes: estimate - used as u32,
            });
        }
    }

    pending.len().checked_sub(1).map(|last| CursorPosition {
        section_index: last,
        remaining_minutes: 0,
    })
}

/// Plan only `request.new_slots` using the default config.
///
/// ```
/// use study_planner::{generate_slot_sync, AvailabilitySlot, Resource, Section, SlotSyncRequest};
///
/// let request = SlotSyncRequest {
///     new_slots: vec![AvailabilitySlot::new("Monday", "09:00", "09:30", 30)],
///     resource: Resource {
///         title: "Course".into(),
///         sections: vec![Section::new("A", Some(60), 0), Section::new("B", Some(30), 1)],
///     },
///     completed_section_titles: ["A".to_string()].into(),
///     existing_sessions: Vec::new(),
/// };
/// let result = generate_slot_sync(&request);
/// assert_eq!(result.assigned_sections, vec!["B"]);
/// ```
pub fn generate_slot_sync(request: &SlotSyncRequest) -> SlotSyncResult {
    generate_slot_sync_with_config(request, &PlannerConfig::default())
}

/// Assign sections to `request.new_slots`, continuing where the existing
/// sessions left off. Pure: the same request always yields the same result.
pub fn generate_slot_sync_with_config(
    request: &SlotSyncRequest,
    config: &PlannerConfig,
) -> SlotSyncResult {
    let pending = pending_sections(&request.resource.sections, &request.completed_section_titles);
    let Some(position) = reconstruct_cursor(&pending, &request.existing_sessions, config) else {
        tracing::debug!("no pending sections; nothing to sync");
        return SlotSyncResult::default();
    };
    if position.remaining_minutes == 0 {
        tracing::debug!(
            section_index = position.section_index,
            "every pending section already scheduled"
        );
        return SlotSyncResult::default();
    }

    let mut cursor = SectionCursor::resume(pending, position, config);
    let mut result = SlotSyncResult::default();
    for slot in sort_slots(&request.new_slots) {
        let Some(allocation) = cursor.assign(&slot) else {
            break;
        };
        if !result.assigned_sections.contains(&allocation.session.topic) {
            result.assigned_sections.push(allocation.session.topic.clone());
        }
        result.sessions.push(allocation.session);
    }

    tracing::debug!(
        new_slots = request.new_slots.len(),
        sessions = result.sessions.len(),
        start_section = position.section_index,
        "synced new slots"
    );
    result
}
