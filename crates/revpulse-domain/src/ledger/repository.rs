use async_trait::async_trait;

use super::aggregate::LedgerState;
use crate::shared::DomainError;

/// Ledger repository trait
///
/// A malformed stored value is the implementation's problem to absorb: it
/// reports `Ok(None)` and the caller falls back to a fresh ledger.
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// Load the persisted ledger state, if any
    async fn load(&self) -> Result<Option<LedgerState>, DomainError>;

    /// Durably write the full ledger state
    async fn save(&self, state: &LedgerState) -> Result<(), DomainError>;
}
