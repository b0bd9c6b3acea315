use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tracing::{error, info, warn};

use revpulse_domain::analytics::{AnalyticsEvent, AnalyticsSink};
use revpulse_domain::ledger::{
    CreditOutcome, DailyLedger, LedgerRepository, ProgressSnapshot,
};
use revpulse_domain::render::{NotificationPresenter, ProgressDisplay};
use revpulse_domain::shared::DomainError;

/// Engagement tracker application service
///
/// Owns the daily ledger and coordinates every credit: mutate, persist,
/// render, notify, and forward to analytics. All collaborators are injected
/// at construction; the analytics sink is an optional capability decided
/// once, not probed at call sites.
pub struct EngagementTracker {
    ledger: Arc<Mutex<DailyLedger>>,
    repo: Arc<dyn LedgerRepository>,
    display: Arc<dyn ProgressDisplay>,
    presenter: Arc<dyn NotificationPresenter>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    autosave: Mutex<Option<JoinHandle<()>>>,
}

impl EngagementTracker {
    pub fn new(
        repo: Arc<dyn LedgerRepository>,
        display: Arc<dyn ProgressDisplay>,
        presenter: Arc<dyn NotificationPresenter>,
        analytics: Option<Arc<dyn AnalyticsSink>>,
        daily_goal: f64,
    ) -> Self {
        Self {
            ledger: Arc::new(Mutex::new(DailyLedger::fresh(daily_goal, today()))),
            repo,
            display,
            presenter,
            analytics,
            autosave: Mutex::new(None),
        }
    }

    /// Load persisted state, apply the rollover rule and render the initial
    /// progress. Missing or malformed stored state degrades to a fresh
    /// ledger; initialization itself never fails.
    pub async fn initialize(&self) {
        let loaded = match self.repo.load().await {
            Ok(state) => state,
            Err(e) => {
                warn!("Failed to load ledger state, starting fresh: {}", e);
                None
            }
        };

        let mut ledger = self.ledger.lock().await;
        if let Some(state) = loaded {
            let goal = ledger.daily_goal();
            *ledger = DailyLedger::restore(state, goal);
        }

        if ledger.rollover_if_new_day(today()) {
            info!("New day, daily counter rolled over");
            if let Err(e) = self.repo.save(&ledger.state()).await {
                warn!("Failed to persist rollover: {}", e);
            }
        }

        self.display.render(&ledger.snapshot());
        info!(
            current = ledger.current_value(),
            goal = ledger.daily_goal(),
            "Engagement tracker initialized"
        );
    }

    /// Apply one credit event: add, persist, render, toast, and fire the
    /// goal dialog the first time the goal is met on a given day.
    pub async fn credit(&self, amount: f64, source: &str) -> Result<CreditOutcome, DomainError> {
        let mut ledger = self.ledger.lock().await;
        let outcome = ledger.credit(amount, today())?;
        self.repo.save(&ledger.state()).await?;

        self.display.render(&ledger.snapshot());
        self.presenter.credit_toast(amount, source);
        if outcome.goal_just_reached {
            info!("Daily goal reached at ${:.2}", outcome.new_total);
            self.presenter.goal_dialog(outcome.new_total);
        }
        drop(ledger);

        log::info!("Credited ${:.2} from {}", amount, source);
        self.track(AnalyticsEvent::conversion(source, amount)).await;

        Ok(outcome)
    }

    /// Reset the counter when the calendar date has moved on. Returns true
    /// if a reset happened; calling again the same day is a no-op.
    pub async fn rollover_if_new_day(&self) -> Result<bool, DomainError> {
        let mut ledger = self.ledger.lock().await;
        if !ledger.rollover_if_new_day(today()) {
            return Ok(false);
        }

        self.repo.save(&ledger.state()).await?;
        self.display.render(&ledger.snapshot());
        info!("Daily counter rolled over");
        Ok(true)
    }

    pub async fn snapshot(&self) -> ProgressSnapshot {
        self.ledger.lock().await.snapshot()
    }

    /// Re-persist the current state, guarding against abnormal termination
    pub async fn persist(&self) -> Result<(), DomainError> {
        let ledger = self.ledger.lock().await;
        self.repo.save(&ledger.state()).await
    }

    /// Spawn the periodic autosave task. A previously running task for this
    /// tracker is aborted and replaced.
    pub async fn start_autosave(&self, interval: Duration) {
        let ledger = Arc::clone(&self.ledger);
        let repo = Arc::clone(&self.repo);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick completes immediately; skip it
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let state = ledger.lock().await.state();
                if let Err(e) = repo.save(&state).await {
                    error!("Autosave failed: {}", e);
                }
            }
        });

        let mut autosave = self.autosave.lock().await;
        if let Some(old_handle) = autosave.replace(handle) {
            warn!("Aborting previous autosave task");
            old_handle.abort();
        }
        info!("Autosave started (every {:?})", interval);
    }

    /// Stop the autosave task and persist one final time
    pub async fn shutdown(&self) {
        if let Some(handle) = self.autosave.lock().await.take() {
            handle.abort();
        }
        if let Err(e) = self.persist().await {
            error!("Final persist on shutdown failed: {}", e);
        }
    }

    async fn track(&self, event: AnalyticsEvent) {
        if let Some(sink) = &self.analytics {
            if let Err(e) = sink.track(&event).await {
                warn!("Analytics event dropped: {}", e);
            }
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
