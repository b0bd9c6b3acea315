use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::shared::{ClickId, DomainError};

/// Hostname fragments mapped to the partner products we link out to.
/// Anything else is logged under the fallback label.
const KNOWN_PRODUCTS: &[(&str, &str)] = &[
    ("teachable", "Teachable"),
    ("convertkit", "ConvertKit"),
    ("shopify", "Shopify"),
    ("later", "Later"),
    ("semrush", "SEMrush"),
    ("canva", "Canva"),
];

const UNKNOWN_PRODUCT: &str = "Unknown Product";

/// A recorded affiliate link click with its estimated revenue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffiliateClick {
    id: ClickId,
    product: String,
    domain: String,
    estimated_revenue: f64,
    clicked_at: DateTime<Utc>,
}

impl AffiliateClick {
    /// Build a click record from the outgoing link. An explicit product label
    /// (the link's data attribute in the original page) wins over hostname
    /// extraction.
    pub fn from_link(
        link: &str,
        product_override: Option<&str>,
        estimated_revenue: f64,
    ) -> Result<Self, DomainError> {
        let url = Url::parse(link)
            .map_err(|e| DomainError::Validation(format!("Not a valid link URL: {}", e)))?;

        let domain = url
            .host_str()
            .ok_or_else(|| DomainError::Validation(format!("Link has no host: {}", link)))?
            .to_lowercase();

        let product = match product_override.map(str::trim).filter(|p| !p.is_empty()) {
            Some(label) => label.to_string(),
            None => product_from_host(&domain).to_string(),
        };

        Ok(Self {
            id: ClickId::new(),
            product,
            domain,
            estimated_revenue,
            clicked_at: Utc::now(),
        })
    }

    /// Reconstruct from persistence
    pub fn restore(
        id: ClickId,
        product: String,
        domain: String,
        estimated_revenue: f64,
        clicked_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product,
            domain,
            estimated_revenue,
            clicked_at,
        }
    }

    pub fn id(&self) -> &ClickId {
        &self.id
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn estimated_revenue(&self) -> f64 {
        self.estimated_revenue
    }

    pub fn clicked_at(&self) -> DateTime<Utc> {
        self.clicked_at
    }
}

fn product_from_host(host: &str) -> &'static str {
    KNOWN_PRODUCTS
        .iter()
        .find(|(fragment, _)| host.contains(fragment))
        .map(|(_, product)| *product)
        .unwrap_or(UNKNOWN_PRODUCT)
}
