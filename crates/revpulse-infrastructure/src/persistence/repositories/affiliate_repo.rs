use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use std::sync::Arc;

use revpulse_domain::affiliate::{AffiliateClick, AffiliateClickRepository, PageViewRepository};
use revpulse_domain::shared::{ClickId, DomainError};

use super::subscriber_repo::parse_datetime_flexible;
use crate::persistence::result_ext::ResultExt;

/// SQLite implementation of AffiliateClickRepository
pub struct SqliteAffiliateClickRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteAffiliateClickRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AffiliateClickRepository for SqliteAffiliateClickRepository {
    async fn append(&self, click: &AffiliateClick) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO affiliate_clicks (id, product, domain, estimated_revenue, clicked_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(click.id().as_str())
        .bind(click.product())
        .bind(click.domain())
        .bind(click.estimated_revenue())
        .bind(click.clicked_at().to_rfc3339())
        .execute(self.pool.as_ref())
        .await
        .map_repo_error("Failed to append affiliate click")?;

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<AffiliateClick>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product, domain, estimated_revenue, clicked_at
            FROM affiliate_clicks
            ORDER BY clicked_at ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await
        .map_repo_error("Failed to list affiliate clicks")?;

        let mut clicks = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("id");
            let product: String = row.get("product");
            let domain: String = row.get("domain");
            let estimated_revenue: f64 = row.get("estimated_revenue");
            let clicked_at: String = row.get("clicked_at");

            clicks.push(AffiliateClick::restore(
                ClickId::from_string(&id),
                product,
                domain,
                estimated_revenue,
                parse_datetime_flexible(&clicked_at)?,
            ));
        }

        Ok(clicks)
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM affiliate_clicks")
            .fetch_one(self.pool.as_ref())
            .await
            .map_repo_error("Failed to count affiliate clicks")?;

        let n: i64 = row.get("n");
        Ok(n as u64)
    }
}

/// SQLite implementation of PageViewRepository over a single pinned row
pub struct SqlitePageViewRepository {
    pool: Arc<SqlitePool>,
}

impl SqlitePageViewRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PageViewRepository for SqlitePageViewRepository {
    async fn increment(&self) -> Result<u64, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO page_views (id, total) VALUES (1, 1)
            ON CONFLICT(id) DO UPDATE SET total = total + 1
            RETURNING total
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await
        .map_repo_error("Failed to record page view")?;

        let total: i64 = row.get("total");
        Ok(total as u64)
    }

    async fn total(&self) -> Result<u64, DomainError> {
        let row = sqlx::query("SELECT total FROM page_views WHERE id = 1")
            .fetch_optional(self.pool.as_ref())
            .await
            .map_repo_error("Failed to read page view total")?;

        Ok(row.map_or(0, |r| {
            let total: i64 = r.get("total");
            total as u64
        }))
    }
}
