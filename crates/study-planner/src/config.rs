//! Tunable constants for the plan generators.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Estimated length used for sections that carry no `estimated_minutes`.
pub const DEFAULT_SECTION_MINUTES: u32 = 30;

/// Maximum number of activities copied from a section's topics onto a session.
pub const DEFAULT_MAX_ACTIVITIES: usize = 3;

/// Focus area reported for a week that received no sessions.
pub const DEFAULT_EMPTY_FOCUS_AREA: &str = "Getting Started";

/// Options shared by every generator.
///
/// Each generator has a plain entry point that uses [`PlannerConfig::default`]
/// and a `_with_config` variant taking an explicit config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Minutes assumed for a section whose estimate is missing.
    pub default_section_minutes: u32,
    /// Upper bound on activities per session. Must be at least 1.
    pub max_activities: usize,
    /// Label used as `focus_area` when a week has no sessions.
    pub empty_focus_area: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_section_minutes: DEFAULT_SECTION_MINUTES,
            max_activities: DEFAULT_MAX_ACTIVITIES,
            empty_focus_area: DEFAULT_EMPTY_FOCUS_AREA.to_string(),
        }
    }
}

impl PlannerConfig {
    /// Check the config for values that would break the output contract.
    ///
    /// # Errors
    ///
    /// Returns [`PlannerError::InvalidConfig`] if `max_activities` is zero
    /// (sessions must always carry at least one activity) or if
    /// `empty_focus_area` is blank.
    pub fn validate(&self) -> Result<()> {
        if self.max_activities == 0 {
            return Err(PlannerError::InvalidConfig(
                "max_activities must be at least 1".to_string(),
            ));
        }
        if self.empty_focus_area.trim().is_empty() {
            return Err(PlannerError::InvalidConfig(
                "empty_focus_area must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
