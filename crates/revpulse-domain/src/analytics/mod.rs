use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::DomainError;

/// A named analytics event with a category, a label and a numeric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
    pub value: f64,
}

impl AnalyticsEvent {
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: label.into(),
            value,
        }
    }

    /// A credit applied to the daily ledger
    pub fn conversion(label: impl Into<String>, value: f64) -> Self {
        Self::new("monetization", "purchase", label, value)
    }

    /// An outgoing affiliate link click
    pub fn affiliate_click(label: impl Into<String>, value: f64) -> Self {
        Self::new("affiliate", "click", label, value)
    }

    /// A one-shot scroll depth milestone ("25%", "50%", "75%")
    pub fn scroll_milestone(label: impl Into<String>) -> Self {
        Self::new("engagement", "scroll", label, 0.0)
    }

    /// A timing measurement in milliseconds
    pub fn timing(label: impl Into<String>, millis: f64) -> Self {
        Self::new("performance", "timing_complete", label, millis)
    }

    /// Total time on page in milliseconds, reported once per session
    pub fn engagement_time(millis: f64) -> Self {
        Self::new("engagement", "engagement_time", "time_on_page", millis)
    }
}

/// Analytics sink trait
///
/// The sink is an optional collaborator: callers hold `Option<Arc<dyn
/// AnalyticsSink>>` decided once at construction, and a missing sink skips
/// the side effect entirely. Sink errors must never interrupt the page.
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    async fn track(&self, event: &AnalyticsEvent) -> Result<(), DomainError>;
}
