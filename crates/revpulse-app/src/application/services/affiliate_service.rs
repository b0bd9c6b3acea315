use std::sync::Arc;
use tracing::{info, warn};

use revpulse_domain::affiliate::{AffiliateClick, AffiliateClickRepository, PageViewRepository};
use revpulse_domain::analytics::{AnalyticsEvent, AnalyticsSink};
use revpulse_domain::shared::DomainError;

use super::engagement_tracker::EngagementTracker;
use crate::application::config::ConversionRules;

const AD_REVENUE_SOURCE: &str = "Ad Revenue (estimated)";

/// Affiliate tracking application service
pub struct AffiliateTrackerService {
    tracker: Arc<EngagementTracker>,
    clicks: Arc<dyn AffiliateClickRepository>,
    page_views: Arc<dyn PageViewRepository>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    click_value: f64,
    ad_revenue_value: f64,
    page_view_milestone: u64,
}

impl AffiliateTrackerService {
    pub fn new(
        tracker: Arc<EngagementTracker>,
        clicks: Arc<dyn AffiliateClickRepository>,
        page_views: Arc<dyn PageViewRepository>,
        analytics: Option<Arc<dyn AnalyticsSink>>,
        rules: &ConversionRules,
    ) -> Self {
        Self {
            tracker,
            clicks,
            page_views,
            analytics,
            click_value: rules.affiliate_click_value,
            ad_revenue_value: rules.ad_revenue_value,
            page_view_milestone: rules.page_view_milestone,
        }
    }

    /// Record an outgoing affiliate link click: credit the estimated
    /// revenue, forward an affiliate analytics event, and append the click
    /// to the durable log.
    pub async fn handle_click(
        &self,
        link: &str,
        product_override: Option<&str>,
    ) -> Result<AffiliateClick, DomainError> {
        let click = AffiliateClick::from_link(link, product_override, self.click_value)?;

        let source = format!("Affiliate Click: {}", click.product());
        self.tracker
            .credit(click.estimated_revenue(), &source)
            .await?;

        if let Some(sink) = &self.analytics {
            let event =
                AnalyticsEvent::affiliate_click(click.product(), click.estimated_revenue());
            if let Err(e) = sink.track(&event).await {
                warn!("Analytics event dropped: {}", e);
            }
        }

        self.clicks.append(&click).await?;
        info!(
            "Recorded affiliate click on {} ({})",
            click.product(),
            click.domain()
        );

        Ok(click)
    }

    /// Record one page view; every milestone-th view credits the estimated
    /// ad revenue. Returns the new running total.
    pub async fn record_page_view(&self) -> Result<u64, DomainError> {
        let total = self.page_views.increment().await?;

        if self.page_view_milestone > 0 && total % self.page_view_milestone == 0 {
            info!("Page view milestone at {} views", total);
            self.tracker
                .credit(self.ad_revenue_value, AD_REVENUE_SOURCE)
                .await?;
        }

        Ok(total)
    }
}
