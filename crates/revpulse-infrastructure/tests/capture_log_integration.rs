/// Integration test: subscriber and affiliate logs over a real database
use std::sync::Arc;

use revpulse_domain::affiliate::{AffiliateClick, AffiliateClickRepository, PageViewRepository};
use revpulse_domain::capture::{Subscriber, SubscriberRepository};
use revpulse_infrastructure::persistence::repositories::{
    SqliteAffiliateClickRepository, SqlitePageViewRepository, SqliteSubscriberRepository,
};
use revpulse_infrastructure::persistence::Database;

async fn setup_pool(dir: &tempfile::TempDir) -> Arc<sqlx::SqlitePool> {
    let db_path = dir.path().join("revpulse.db");
    let db = Database::new(db_path.to_str().unwrap())
        .await
        .expect("Database open should succeed");
    db.run_migrations()
        .await
        .expect("Migrations should succeed");
    Arc::new(db.pool().clone())
}

#[tokio::test]
async fn subscriber_log_accumulates_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_pool(&dir).await;

    {
        let repo = SqliteSubscriberRepository::new(pool.clone());
        let subscriber = Subscriber::new("first@example.com", Some("First")).unwrap();
        repo.append(&subscriber).await.unwrap();
    }

    let repo = SqliteSubscriberRepository::new(pool);
    let subscriber = Subscriber::new("second@example.com", None).unwrap();
    repo.append(&subscriber).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].email(), "first@example.com");
    assert_eq!(all[1].email(), "second@example.com");
    assert_eq!(repo.count().await.unwrap(), 2);
}

#[tokio::test]
async fn click_log_keeps_product_and_revenue() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_pool(&dir).await;

    let repo = SqliteAffiliateClickRepository::new(pool);
    let click = AffiliateClick::from_link("https://www.canva.com/pro?ref=rp", None, 25.0).unwrap();
    repo.append(&click).await.unwrap();

    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].product(), "Canva");
    assert_eq!(all[0].domain(), "www.canva.com");
    assert_eq!(all[0].estimated_revenue(), 25.0);
}

#[tokio::test]
async fn page_view_counter_is_durable() {
    let dir = tempfile::tempdir().unwrap();
    let pool = setup_pool(&dir).await;

    {
        let repo = SqlitePageViewRepository::new(pool.clone());
        for _ in 0..5 {
            repo.increment().await.unwrap();
        }
    }

    let repo = SqlitePageViewRepository::new(pool);
    assert_eq!(repo.total().await.unwrap(), 5);
    assert_eq!(repo.increment().await.unwrap(), 6);
}
