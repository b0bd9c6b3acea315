/// Integration test: ledger persistence over a real on-disk database
///
/// Verifies that a credit written through the repository is exactly what a
/// fresh repository (simulating a reload) gets back, including the
/// once-per-day goal marker.
use std::sync::Arc;

use chrono::NaiveDate;
use revpulse_domain::ledger::{DailyLedger, LedgerRepository, LedgerState};
use revpulse_infrastructure::persistence::repositories::SqliteLedgerRepository;
use revpulse_infrastructure::persistence::Database;

async fn setup_db(dir: &tempfile::TempDir) -> Database {
    let db_path = dir.path().join("revpulse.db");
    let db = Database::new(db_path.to_str().unwrap())
        .await
        .expect("Database open should succeed");
    db.run_migrations()
        .await
        .expect("Migrations should succeed");
    db
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn ledger_state_survives_reload() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_db(&dir).await;
    let pool = Arc::new(db.pool().clone());

    let today = day(2025, 7, 1);

    // Session one: accumulate past the goal and persist
    {
        let repo = SqliteLedgerRepository::new(pool.clone());
        let mut ledger = DailyLedger::fresh(100.0, today);

        ledger.credit(50.0, today).unwrap();
        repo.save(&ledger.state()).await.unwrap();

        let outcome = ledger.credit(60.0, today).unwrap();
        assert!(outcome.goal_just_reached);
        repo.save(&ledger.state()).await.unwrap();
    }

    // Session two: a fresh repository over the same file sees the same state
    let repo = SqliteLedgerRepository::new(pool);
    let loaded = repo.load().await.unwrap().expect("State should exist");
    assert_eq!(loaded.current_value, 110.0);
    assert_eq!(loaded.last_update_date, today);
    assert_eq!(loaded.goal_reached_on, Some(today));

    // The restored ledger must not re-arm the goal dialog
    let mut restored = DailyLedger::restore(loaded, 100.0);
    let outcome = restored.credit(5.0, today).unwrap();
    assert!(!outcome.goal_just_reached);
}

#[tokio::test]
async fn rollover_clears_yesterdays_total() {
    let dir = tempfile::tempdir().unwrap();
    let db = setup_db(&dir).await;
    let pool = Arc::new(db.pool().clone());

    let yesterday = day(2025, 6, 30);
    let today = day(2025, 7, 1);

    let repo = SqliteLedgerRepository::new(pool);
    repo.save(&LedgerState {
        current_value: 80.0,
        last_update_date: yesterday,
        goal_reached_on: None,
    })
    .await
    .unwrap();

    let mut ledger = DailyLedger::restore(repo.load().await.unwrap().unwrap(), 100.0);
    assert!(ledger.rollover_if_new_day(today));
    repo.save(&ledger.state()).await.unwrap();

    let loaded = repo.load().await.unwrap().unwrap();
    assert_eq!(loaded.current_value, 0.0);
    assert_eq!(loaded.last_update_date, today);
}
