use serde::{Deserialize, Serialize};

/// Result of a single credit applied to the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditOutcome {
    pub new_total: f64,
    /// True only the first time the daily goal is met or exceeded on a given day
    pub goal_just_reached: bool,
}

/// Point-in-time view of the ledger for the progress display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub current_value: f64,
    pub daily_goal: f64,
    /// Progress toward the goal, capped at 100
    pub percent: f64,
}

impl ProgressSnapshot {
    pub fn new(current_value: f64, daily_goal: f64) -> Self {
        let percent = if daily_goal > 0.0 {
            ((current_value / daily_goal) * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            current_value,
            daily_goal,
            percent,
        }
    }
}
