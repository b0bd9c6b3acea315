//! In-memory repository implementations.
//!
//! Drop-in substitutes for the sqlite repositories, used by tests and by
//! callers that want a tracker without any on-disk footprint.

use async_trait::async_trait;
use tokio::sync::RwLock;

use revpulse_domain::affiliate::{AffiliateClick, AffiliateClickRepository, PageViewRepository};
use revpulse_domain::capture::{Subscriber, SubscriberRepository};
use revpulse_domain::ledger::{LedgerRepository, LedgerState};
use revpulse_domain::shared::DomainError;

#[derive(Default)]
pub struct InMemoryLedgerRepository {
    state: RwLock<Option<LedgerState>>,
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the repository with a pre-existing state (e.g. yesterday's)
    pub fn with_state(state: LedgerState) -> Self {
        Self {
            state: RwLock::new(Some(state)),
        }
    }
}

#[async_trait]
impl LedgerRepository for InMemoryLedgerRepository {
    async fn load(&self) -> Result<Option<LedgerState>, DomainError> {
        Ok(self.state.read().await.clone())
    }

    async fn save(&self, state: &LedgerState) -> Result<(), DomainError> {
        *self.state.write().await = Some(state.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySubscriberRepository {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn append(&self, subscriber: &Subscriber) -> Result<(), DomainError> {
        self.subscribers.write().await.push(subscriber.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Subscriber>, DomainError> {
        Ok(self.subscribers.read().await.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.subscribers.read().await.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryAffiliateClickRepository {
    clicks: RwLock<Vec<AffiliateClick>>,
}

impl InMemoryAffiliateClickRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AffiliateClickRepository for InMemoryAffiliateClickRepository {
    async fn append(&self, click: &AffiliateClick) -> Result<(), DomainError> {
        self.clicks.write().await.push(click.clone());
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<AffiliateClick>, DomainError> {
        Ok(self.clicks.read().await.clone())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.clicks.read().await.len() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryPageViewRepository {
    total: RwLock<u64>,
}

impl InMemoryPageViewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageViewRepository for InMemoryPageViewRepository {
    async fn increment(&self) -> Result<u64, DomainError> {
        let mut total = self.total.write().await;
        *total += 1;
        Ok(*total)
    }

    async fn total(&self) -> Result<u64, DomainError> {
        Ok(*self.total.read().await)
    }
}
