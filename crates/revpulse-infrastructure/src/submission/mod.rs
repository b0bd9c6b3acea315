use async_trait::async_trait;
use reqwest::Client;
use tokio::time::Duration;

use revpulse_domain::capture::{SubmissionGateway, SubmissionReceipt, SubmissionRequest};
use revpulse_domain::shared::DomainError;

/// Simulated submission gateway
///
/// Suspends for a fixed delay and always accepts, standing in for a real
/// list provider during development and demos. The delay is non-blocking;
/// the rest of the interface stays responsive while a submission is pending.
pub struct SimulatedSubmissionGateway {
    delay: Duration,
}

impl SimulatedSubmissionGateway {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SubmissionGateway for SimulatedSubmissionGateway {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionReceipt, DomainError> {
        tokio::time::sleep(self.delay).await;

        log::info!("Simulated signup accepted for {}", request.email);
        Ok(SubmissionReceipt::accepted("subscribed"))
    }
}

/// HTTP submission gateway
///
/// Posts the signup to a list-provider endpoint. Swapping this in for the
/// simulated gateway is a wiring change only; the capture flow is unchanged.
pub struct HttpSubmissionGateway {
    endpoint: String,
    client: Client,
}

impl HttpSubmissionGateway {
    pub fn new(endpoint: String) -> Self {
        Self {
            endpoint,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl SubmissionGateway for HttpSubmissionGateway {
    async fn submit(&self, request: &SubmissionRequest) -> Result<SubmissionReceipt, DomainError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| DomainError::SubmissionFailed(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DomainError::SubmissionFailed(format!(
                "List provider answered {}: {}",
                status, body
            )));
        }

        Ok(SubmissionReceipt::accepted("subscribed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_gateway_always_accepts() {
        let gateway = SimulatedSubmissionGateway::new(Duration::from_millis(0));
        let request = SubmissionRequest {
            email: "reader@example.com".to_string(),
            name: None,
        };

        let receipt = gateway.submit(&request).await.unwrap();
        assert!(receipt.accepted);
    }

    #[tokio::test]
    async fn test_simulated_gateway_waits_its_delay() {
        let gateway = SimulatedSubmissionGateway::new(Duration::from_millis(20));
        let request = SubmissionRequest {
            email: "reader@example.com".to_string(),
            name: None,
        };

        let started = tokio::time::Instant::now();
        gateway.submit(&request).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
