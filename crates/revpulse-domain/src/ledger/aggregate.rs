use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::value_objects::{CreditOutcome, ProgressSnapshot};
use crate::shared::DomainError;

/// Persisted portion of the ledger. The daily goal itself is configuration,
/// not state, and is supplied on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerState {
    pub current_value: f64,
    pub last_update_date: NaiveDate,
    pub goal_reached_on: Option<NaiveDate>,
}

/// DailyLedger aggregate root
///
/// Accumulates credit for the current calendar day. The value is
/// monotonically non-decreasing within a day and resets to zero exactly once
/// when the observed date differs from the stored one. The goal dialog is
/// armed at most once per day, tracked by `goal_reached_on` so a process
/// restart cannot re-trigger it.
#[derive(Debug, Clone)]
pub struct DailyLedger {
    current_value: f64,
    daily_goal: f64,
    last_update_date: NaiveDate,
    goal_reached_on: Option<NaiveDate>,
}

impl DailyLedger {
    /// Fresh ledger with no accumulated credit
    pub fn fresh(daily_goal: f64, today: NaiveDate) -> Self {
        Self {
            current_value: 0.0,
            daily_goal,
            last_update_date: today,
            goal_reached_on: None,
        }
    }

    /// Reconstruct from persistence
    pub fn restore(state: LedgerState, daily_goal: f64) -> Self {
        Self {
            current_value: state.current_value.max(0.0),
            daily_goal,
            last_update_date: state.last_update_date,
            goal_reached_on: state.goal_reached_on,
        }
    }

    pub fn current_value(&self) -> f64 {
        self.current_value
    }

    pub fn daily_goal(&self) -> f64 {
        self.daily_goal
    }

    pub fn last_update_date(&self) -> NaiveDate {
        self.last_update_date
    }

    pub fn goal_reached_on(&self) -> Option<NaiveDate> {
        self.goal_reached_on
    }

    /// Add a credit for `today`, applying the rollover rule first so a
    /// session that crosses midnight never accumulates into yesterday's total.
    pub fn credit(&mut self, amount: f64, today: NaiveDate) -> Result<CreditOutcome, DomainError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::Validation(format!(
                "Credit amount must be a finite, non-negative number, got {}",
                amount
            )));
        }

        self.rollover_if_new_day(today);

        self.current_value += amount;
        self.last_update_date = today;

        let goal_just_reached = self.current_value >= self.daily_goal
            && self.daily_goal > 0.0
            && self.goal_reached_on != Some(today);

        if goal_just_reached {
            self.goal_reached_on = Some(today);
        }

        Ok(CreditOutcome {
            new_total: self.current_value,
            goal_just_reached,
        })
    }

    /// Reset the counter when the calendar date has changed. Returns true if
    /// a reset happened. Calling again on the same day is a no-op.
    pub fn rollover_if_new_day(&mut self, today: NaiveDate) -> bool {
        if self.last_update_date == today {
            return false;
        }

        self.current_value = 0.0;
        self.last_update_date = today;
        true
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::new(self.current_value, self.daily_goal)
    }

    /// State to hand to the repository after every mutation
    pub fn state(&self) -> LedgerState {
        LedgerState {
            current_value: self.current_value,
            last_update_date: self.last_update_date,
            goal_reached_on: self.goal_reached_on,
        }
    }
}
