use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// Payload handed to the list provider on signup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub email: String,
    pub name: Option<String>,
}

/// Provider's answer to a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub accepted: bool,
    pub message: String,
}

impl SubmissionReceipt {
    pub fn accepted(message: impl Into<String>) -> Self {
        Self {
            accepted: true,
            message: message.into(),
        }
    }
}

/// Submission gateway trait (Strategy pattern)
///
/// The capture flow is written against this seam so a real list-provider
/// client can replace the simulated one without touching tracker logic.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    /// Hand a signup to the list provider. The call never blocks the event
    /// loop; a slow provider only suspends this one submission.
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionReceipt, DomainError>;
}
