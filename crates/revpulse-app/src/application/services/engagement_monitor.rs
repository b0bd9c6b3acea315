use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::warn;

use revpulse_domain::analytics::{AnalyticsEvent, AnalyticsSink};

/// Engagement monitor
///
/// Analytics-only observer of page performance and scroll depth. Each depth
/// milestone fires once per session; a large jump past several thresholds
/// fires all of them. With no sink configured every call is a no-op.
pub struct EngagementMonitor {
    analytics: Option<Arc<dyn AnalyticsSink>>,
    quarter: AtomicBool,
    half: AtomicBool,
    three_quarters: AtomicBool,
}

impl EngagementMonitor {
    pub fn new(analytics: Option<Arc<dyn AnalyticsSink>>) -> Self {
        Self {
            analytics,
            quarter: AtomicBool::new(false),
            half: AtomicBool::new(false),
            three_quarters: AtomicBool::new(false),
        }
    }

    pub async fn record_page_load(&self, elapsed: Duration) {
        log::info!("Page loaded in {}ms", elapsed.as_millis());
        self.track(AnalyticsEvent::timing("load", elapsed.as_millis() as f64))
            .await;
    }

    pub async fn record_scroll_depth(&self, percent: f64) {
        if percent > 25.0 && !self.quarter.swap(true, Ordering::Relaxed) {
            self.track(AnalyticsEvent::scroll_milestone("25%")).await;
        }
        if percent > 50.0 && !self.half.swap(true, Ordering::Relaxed) {
            self.track(AnalyticsEvent::scroll_milestone("50%")).await;
        }
        if percent > 75.0 && !self.three_quarters.swap(true, Ordering::Relaxed) {
            self.track(AnalyticsEvent::scroll_milestone("75%")).await;
        }
    }

    pub async fn record_session_end(&self, time_on_page: Duration) {
        self.track(AnalyticsEvent::engagement_time(
            time_on_page.as_millis() as f64
        ))
        .await;
    }

    async fn track(&self, event: AnalyticsEvent) {
        if let Some(sink) = &self.analytics {
            if let Err(e) = sink.track(&event).await {
                warn!("Analytics event dropped: {}", e);
            }
        }
    }
}
