use serde::{Deserialize, Serialize};

pub const GRADUATION_QUOTA: u32 = 180;
pub const MAX_CREDITS_PER_TERM: u32 = 18;
pub const HORIZON_YEARS: u32 = 4;

/// Credit limits a schedule is built under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanLimits {
    /// Catalog credits needed for the plan to count as complete.
    pub graduation_quota: u32,
    /// Credit cap for any single (year, term) slot.
    pub max_credits_per_term: u32,
    /// Number of consecutive academic years in the plan.
    pub horizon_years: u32,
}

impl Default for PlanLimits {
    fn default() -> Self {
        Self {
            graduation_quota: GRADUATION_QUOTA,
            max_credits_per_term: MAX_CREDITS_PER_TERM,
            horizon_years: HORIZON_YEARS,
        }
    }
}
