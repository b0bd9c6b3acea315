use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;
use tracing::warn;

use revpulse_domain::ledger::{LedgerRepository, LedgerState};
use revpulse_domain::shared::DomainError;

use crate::persistence::result_ext::ResultExt;

/// SQLite implementation of LedgerRepository
///
/// The ledger lives in a single pinned row (id = 1); saves are upserts. A
/// row with an unparseable date is treated as absent so the caller falls
/// back to a fresh ledger instead of failing the page.
pub struct SqliteLedgerRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLedgerRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerRepository for SqliteLedgerRepository {
    async fn load(&self) -> Result<Option<LedgerState>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT current_value, last_update_date, goal_reached_on
            FROM daily_ledger
            WHERE id = 1
            "#,
        )
        .fetch_optional(self.pool.as_ref())
        .await
        .map_repo_error("Failed to load ledger state")?;

        let Some(row) = row else {
            return Ok(None);
        };

        let current_value: f64 = row.get("current_value");
        let last_update_date: String = row.get("last_update_date");
        let goal_reached_on: Option<String> = row.get("goal_reached_on");

        let Ok(last_update_date) = last_update_date.parse::<NaiveDate>() else {
            warn!(
                stored = %last_update_date,
                "Stored ledger date is malformed, treating state as absent"
            );
            return Ok(None);
        };

        // A malformed goal date only loses the once-per-day guard, not the total
        let goal_reached_on = goal_reached_on.and_then(|d| d.parse::<NaiveDate>().ok());

        Ok(Some(LedgerState {
            current_value,
            last_update_date,
            goal_reached_on,
        }))
    }

    async fn save(&self, state: &LedgerState) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO daily_ledger (id, current_value, last_update_date, goal_reached_on)
            VALUES (1, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                current_value = excluded.current_value,
                last_update_date = excluded.last_update_date,
                goal_reached_on = excluded.goal_reached_on
            "#,
        )
        .bind(state.current_value)
        .bind(state.last_update_date.to_string())
        .bind(state.goal_reached_on.map(|d| d.to_string()))
        .execute(self.pool.as_ref())
        .await
        .map_repo_error("Failed to save ledger state")?;

        Ok(())
    }
}
