use async_trait::async_trait;

use super::click::AffiliateClick;
use crate::shared::DomainError;

/// Affiliate click log repository trait
#[async_trait]
pub trait AffiliateClickRepository: Send + Sync {
    /// Append a click record to the log
    async fn append(&self, click: &AffiliateClick) -> Result<(), DomainError>;

    /// All recorded clicks, oldest first
    async fn find_all(&self) -> Result<Vec<AffiliateClick>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}

/// Durable page-view counter trait
#[async_trait]
pub trait PageViewRepository: Send + Sync {
    /// Record one page view and return the new running total
    async fn increment(&self) -> Result<u64, DomainError>;

    async fn total(&self) -> Result<u64, DomainError>;
}
