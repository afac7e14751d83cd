//! Progress bookkeeping for callers.
//!
//! The single-week and sync generators leave completion at 0 and expect the
//! caller to supply completed titles and carryover. These helpers derive
//! those inputs from stored sessions.

use std::collections::{BTreeSet, HashMap};

use crate::config::PlannerConfig;
use crate::model::{PlanSession, Section, SessionRecord};

/// `min(100, round(credited / total * 100))`, or 0 for an empty resource.
pub fn completion_percentage(credited_minutes: u64, total_minutes: u64) -> u8 {
    if total_minutes == 0 {
        return 0;
    }
    let percent = (credited_minutes as f64 / total_minutes as f64 * 100.0).round();
    percent.min(100.0) as u8
}

/// Cumulative completion from every scheduled session of a goal.
///
/// Each section is credited with the minutes scheduled against its title, up
/// to its estimate. Records whose topic matches no section are ignored.
pub fn planned_completion_percentage(
    sections: &[Section],
    records: &[SessionRecord],
    config: &PlannerConfig,
) -> u8 {
    let scheduled = minutes_by_topic(records.iter().map(|r| (&r.topic, r.duration_minutes)));
    let mut total: u64 = 0;
    let mut credited: u64 = 0;
    for section in sections {
        let estimate = u64::from(section.minutes(config));
        total += estimate;
        credited += scheduled
            .get(section.title.as_str())
            .copied()
            .unwrap_or(0)
            .min(estimate);
    }
    completion_percentage(credited, total)
}

/// Titles of sections whose completed sessions add up to at least their
/// estimated minutes.
pub fn completed_section_titles(
    sections: &[Section],
    sessions: &[PlanSession],
    config: &PlannerConfig,
) -> BTreeSet<String> {
    let done = minutes_by_topic(
        sessions
            .iter()
            .filter(|s| s.status.is_completed())
            .map(|s| (&s.topic, s.duration_minutes)),
    );
    sections
        .iter()
        .filter(|section| {
            done.get(section.title.as_str())
                .is_some_and(|&m| m >= u64::from(section.minutes(config)))
        })
        .map(|section| section.title.clone())
        .collect()
}

/// Sessions from a previous week that were not completed, in their
/// original order. Feed these to the single-week generator as carryover.
pub fn carryover_sessions(previous_week: &[PlanSession]) -> Vec<PlanSession> {
    previous_week
        .iter()
        .filter(|s| !s.status.is_completed())
        .cloned()
        .collect()
}

fn minutes_by_topic<'a>(
    entries: impl Iterator<Item = (&'a String, u32)>,
) -> HashMap<&'a str, u64> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    for (topic, minutes) in entries {
        *totals.entry(topic.as_str()).or_default() += u64::from(minutes);
    }
    totals
}
