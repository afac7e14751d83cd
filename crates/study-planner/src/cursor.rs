//! The allocation cursor shared by all three generators.
//!
//! A cursor walks an ordered section list and hands out the current section
//! to each slot it is given. The rules are the same everywhere:
//!
//! - a slot always carries exactly one section, even when it is longer than
//!   what is left of that section;
//! - only `min(slot, remaining)` minutes are credited toward the section;
//! - once a section's remaining minutes hit zero the cursor moves on to the
//!   next section in `order_index` order.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::model::{AvailabilitySlot, PlanSession, Section};

/// Where allocation stands within an ordered section list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CursorPosition {
    pub section_index: usize,
    pub remaining_minutes: u32,
}

/// One slot's worth of output from [`SectionCursor::assign`].
#[derive(Debug, Clone)]
pub(crate) struct Allocation {
    pub session: PlanSession,
    /// Minutes of this slot that count toward the section.
    pub credited_minutes: u32,
}

#[derive(Debug)]
pub(crate) struct SectionCursor<'a> {
    sections: Vec<&'a Section>,
    position: CursorPosition,
    config: &'a PlannerConfig,
}

impl<'a> SectionCursor<'a> {
    /// A cursor at the start of the first section.
    pub fn new(sections: Vec<&'a Section>, config: &'a PlannerConfig) -> Self {
        let remaining_minutes = sections.first().map_or(0, |s| s.minutes(config));
        Self {
            sections,
            position: CursorPosition {
                section_index: 0,
                remaining_minutes,
            },
            config,
        }
    }

    /// A cursor resumed at a previously computed position.
    pub fn resume(
        sections: Vec<&'a Section>,
        position: CursorPosition,
        config: &'a PlannerConfig,
    ) -> Self {
        Self {
            sections,
            position,
            config,
        }
    }

    /// Assign the current section to `slot` and advance. Returns `None` once
    /// every section has been handed out.
    pub fn assign(&mut self, slot: &AvailabilitySlot) -> Option<Allocation> {
        let section = *self.sections.get(self.position.section_index)?;
        let credited_minutes = slot.duration_minutes.min(self.position.remaining_minutes);
        self.position.remaining_minutes -= credited_minutes;

        tracing::trace!(
            day = %slot.day,
            start = %slot.start_time,
            section = %section.title,
            credited_minutes,
            remaining_minutes = self.position.remaining_minutes,
            "slot assigned"
        );

        if self.position.remaining_minutes == 0 {
            self.position.section_index += 1;
            self.position.remaining_minutes = self
                .sections
                .get(self.position.section_index)
                .map_or(0, |s| s.minutes(self.config));
        }

        let session = PlanSession::for_slot(
            slot,
            section.title.clone(),
            section.activities(self.config),
        );
        Some(Allocation {
            session,
            credited_minutes,
        })
    }
}

/// Sections not listed in `completed`, sorted by `order_index`. Ties keep
/// their input order. This is the list [`crate::sync::reconstruct_cursor`]
/// indexes into.
pub fn pending_sections<'a>(
    sections: &'a [Section],
    completed: &BTreeSet<String>,
) -> Vec<&'a Section> {
    let mut pending: Vec<&Section> = sections
        .iter()
        .filter(|s| !completed.contains(&s.title))
        .collect();
    pending.sort_by_key(|s| s.order_index);
    pending
}
