use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use revpulse_domain::affiliate::{AffiliateClickRepository, PageViewRepository};
use revpulse_domain::analytics::AnalyticsSink;
use revpulse_domain::capture::{SubmissionGateway, SubscriberRepository};
use revpulse_domain::ledger::LedgerRepository;
use revpulse_domain::render::{NotificationPresenter, ProgressDisplay};
use revpulse_infrastructure::analytics::HttpAnalyticsSink;
use revpulse_infrastructure::persistence::repositories::{
    SqliteAffiliateClickRepository, SqliteLedgerRepository, SqlitePageViewRepository,
    SqliteSubscriberRepository,
};
use revpulse_infrastructure::persistence::Database;
use revpulse_infrastructure::render::TerminalSurface;
use revpulse_infrastructure::submission::{HttpSubmissionGateway, SimulatedSubmissionGateway};

use crate::application::config::ConversionRules;
use crate::application::services::{
    AffiliateTrackerService, EmailCaptureService, EngagementMonitor, EngagementTracker,
};

/// Fully wired application services
pub struct Services {
    pub tracker: Arc<EngagementTracker>,
    pub capture: Arc<EmailCaptureService>,
    pub affiliate: Arc<AffiliateTrackerService>,
    pub monitor: Arc<EngagementMonitor>,
}

/// Wire the whole tracker stack over a sqlite database and the terminal
/// surface. The optional collaborators (analytics collector, real list
/// provider) are decided here, once, from the environment.
pub async fn build(db_path: &str, rules: ConversionRules) -> Result<Services> {
    let db = Database::new(db_path).await?;
    db.run_migrations().await?;
    let pool = Arc::new(db.pool().clone());

    let ledger_repo: Arc<dyn LedgerRepository> =
        Arc::new(SqliteLedgerRepository::new(pool.clone()));
    let subscriber_repo: Arc<dyn SubscriberRepository> =
        Arc::new(SqliteSubscriberRepository::new(pool.clone()));
    let click_repo: Arc<dyn AffiliateClickRepository> =
        Arc::new(SqliteAffiliateClickRepository::new(pool.clone()));
    let page_view_repo: Arc<dyn PageViewRepository> =
        Arc::new(SqlitePageViewRepository::new(pool));

    let surface = Arc::new(TerminalSurface::stdout());
    let display: Arc<dyn ProgressDisplay> = surface.clone();
    let presenter: Arc<dyn NotificationPresenter> = surface;

    let analytics: Option<Arc<dyn AnalyticsSink>> = match std::env::var("REVPULSE_ANALYTICS_URL") {
        Ok(url) if !url.is_empty() => {
            info!("Analytics collector configured: {}", url);
            Some(Arc::new(HttpAnalyticsSink::new(url)))
        }
        _ => {
            info!("No analytics collector configured, events will be skipped");
            None
        }
    };

    let gateway: Arc<dyn SubmissionGateway> = match std::env::var("REVPULSE_SUBMIT_URL") {
        Ok(url) if !url.is_empty() => {
            info!("List provider configured: {}", url);
            Arc::new(HttpSubmissionGateway::new(url))
        }
        _ => {
            info!("No list provider configured, submissions are simulated");
            Arc::new(SimulatedSubmissionGateway::new(rules.submission_delay()))
        }
    };

    let tracker = Arc::new(EngagementTracker::new(
        ledger_repo,
        display,
        presenter.clone(),
        analytics.clone(),
        rules.daily_goal,
    ));
    tracker.initialize().await;
    tracker.start_autosave(rules.autosave_interval()).await;

    let capture = Arc::new(EmailCaptureService::new(
        tracker.clone(),
        gateway,
        subscriber_repo,
        presenter,
        &rules,
    ));
    let affiliate = Arc::new(AffiliateTrackerService::new(
        tracker.clone(),
        click_repo,
        page_view_repo,
        analytics.clone(),
        &rules,
    ));
    let monitor = Arc::new(EngagementMonitor::new(analytics));

    Ok(Services {
        tracker,
        capture,
        affiliate,
        monitor,
    })
}
