use async_trait::async_trait;

use super::subscriber::Subscriber;
use crate::shared::DomainError;

/// Subscriber log repository trait
#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    /// Append a captured subscriber to the log
    async fn append(&self, subscriber: &Subscriber) -> Result<(), DomainError>;

    /// All captured subscribers, oldest first
    async fn find_all(&self) -> Result<Vec<Subscriber>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
