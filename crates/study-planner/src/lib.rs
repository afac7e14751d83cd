//! # study-planner
//!
//! Deterministic allocation of study content onto weekly availability.
//!
//! Given a resource broken into ordered sections and the time slots a learner
//! has committed to, the planner decides which section each slot covers. It
//! never splits a slot, never reorders content, and never reads the clock or
//! touches storage: every input arrives as an argument and every output is a
//! plain value for the caller to persist.
//!
//! ## Modules
//!
//! - [`ordering`] — Weekday/start-time ordering of slots, strict slot validation
//! - [`week`] — Week numbers and week start dates relative to a plan start
//! - [`multi_week`] — Project a whole resource across weeks in one pass
//! - [`single_week`] — Regenerate one week with carryover priority
//! - [`sync`] — Plan only newly added slots, resuming from session history
//! - [`progress`] — Completion percentages, completed titles, carryover selection
//! - [`config`] — Tunable defaults
//! - [`error`] — Error types

pub mod config;
mod cursor;
pub mod error;
pub mod model;
pub mod multi_week;
pub mod ordering;
pub mod progress;
pub mod single_week;
pub mod sync;
pub mod week;

pub use config::PlannerConfig;
pub use cursor::{pending_sections, CursorPosition};
pub use error::PlannerError;
pub use model::{
    AvailabilitySlot, MultiWeekPlanResult, PlanSession, Resource, Section, SessionRecord,
    SessionStatus, WeekPlan, WeeklyPlan,
};
pub use multi_week::{generate_multi_week_plan, generate_multi_week_plan_with_config, MultiWeekRequest};
pub use ordering::{day_index, parse_weekday, sort_slots, validate_slots};
pub use progress::{
    carryover_sessions, completed_section_titles, completion_percentage,
    planned_completion_percentage,
};
pub use single_week::{generate_week_plan, generate_week_plan_with_config, WeekRequest};
pub use sync::{
    generate_slot_sync, generate_slot_sync_with_config, reconstruct_cursor, SlotSyncRequest,
    SlotSyncResult,
};
pub use week::{current_week_number, current_week_number_at, parse_date, week_start_date};
