use async_trait::async_trait;
use reqwest::Client;

use revpulse_domain::analytics::{AnalyticsEvent, AnalyticsSink};
use revpulse_domain::shared::DomainError;

/// HTTP analytics sink
///
/// Posts each event as a JSON payload to a collector endpoint. The tracker
/// treats the sink as best-effort; errors returned here are logged by the
/// caller and never surface to the user.
pub struct HttpAnalyticsSink {
    endpoint: String,
    client: Client,
}

impl HttpAnalyticsSink {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }

    fn build_payload(&self, event: &AnalyticsEvent) -> serde_json::Value {
        serde_json::json!({
            "event_category": event.category,
            "event_action": event.action,
            "event_label": event.label,
            "value": event.value,
        })
    }
}

#[async_trait]
impl AnalyticsSink for HttpAnalyticsSink {
    async fn track(&self, event: &AnalyticsEvent) -> Result<(), DomainError> {
        let payload = self.build_payload(event);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                DomainError::Infrastructure(format!("Failed to send analytics event: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::Infrastructure(format!(
                "Analytics collector answered {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
