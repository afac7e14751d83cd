//! Error types for study-planner operations.
//!
//! The plan generators themselves never fail; these errors come from the
//! parsing and validation helpers that sit in front of them.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Unknown weekday: {0}")]
    UnknownWeekday(String),

    #[error("Invalid slot: {0}")]
    InvalidSlot(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
