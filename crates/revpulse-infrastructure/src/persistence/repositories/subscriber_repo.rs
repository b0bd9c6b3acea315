use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use revpulse_domain::capture::{Subscriber, SubscriberRepository};
use revpulse_domain::shared::{DomainError, SubscriberId};

use crate::persistence::result_ext::ResultExt;

/// Parse datetime string, supporting both the ISO 8601 format we write and
/// the bare '2025-12-20 12:34:56' form older rows may carry
pub(crate) fn parse_datetime_flexible(datetime_str: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = datetime_str.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }

    let iso_format = datetime_str.replace(' ', "T") + "Z";
    iso_format
        .parse::<DateTime<Utc>>()
        .map_err(|e| DomainError::Serialization(format!("Invalid datetime format: {}", e)))
}

/// SQLite implementation of SubscriberRepository
pub struct SqliteSubscriberRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteSubscriberRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriberRepository for SqliteSubscriberRepository {
    async fn append(&self, subscriber: &Subscriber) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (id, email, name, captured_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(subscriber.id().as_str())
        .bind(subscriber.email())
        .bind(subscriber.name())
        .bind(subscriber.captured_at().to_rfc3339())
        .execute(self.pool.as_ref())
        .await
        .map_repo_error("Failed to append subscriber")?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Subscriber>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, email, name, captured_at
            FROM subscribers
            ORDER BY captured_at ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_repo_error("Failed to list subscribers")?;

        let mut subscribers = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let email: String = row.get("email");
            let name: Option<String> = row.get("name");
            let captured_at: String = row.get("captured_at");

            subscribers.push(Subscriber::restore(
                SubscriberId::from_string(&id),
                email,
                name,
                parse_datetime_flexible(&captured_at)?,
            ));
        }

        Ok(subscribers)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM subscribers")
            .fetch_one(self.pool.as_ref())
            .await
            .map_repo_error("Failed to count subscribers")?;

        let n: i64 = row.get("n");
        Ok(n as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        sqlx::query(
            r#"
            CREATE TABLE subscribers (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL,
                name TEXT,
                captured_at TEXT NOT NULL
            );
            "#,
        )
        .execute(&pool)
        .await
        .unwrap();

        pool
    }

    #[tokio::test]
    async fn test_append_and_find_all() {
        let pool = setup_test_db().await;
        let repo = SqliteSubscriberRepository::new(Arc::new(pool));

        let first = Subscriber::new("a@example.com", Some("A")).unwrap();
        let second = Subscriber::new("b@example.com", None).unwrap();
        repo.append(&first).await.unwrap();
        repo.append(&second).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].email(), "a@example.com");
        assert_eq!(all[0].name(), Some("A"));
        assert_eq!(all[1].email(), "b@example.com");
        assert_eq!(all[1].name(), None);

        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_count_on_empty_log() {
        let pool = setup_test_db().await;
        let repo = SqliteSubscriberRepository::new(Arc::new(pool));

        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[test]
    fn test_parse_datetime_flexible_accepts_both_formats() {
        assert!(parse_datetime_flexible("2025-07-01T10:32:15Z").is_ok());
        assert!(parse_datetime_flexible("2025-07-01 10:32:15").is_ok());
        assert!(parse_datetime_flexible("garbage").is_err());
    }
}
