use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

use revpulse_domain::capture::{
    SubmissionGateway, SubmissionRequest, Subscriber, SubscriberRepository,
};
use revpulse_domain::render::{FormFeedback, NotificationPresenter};
use revpulse_domain::shared::DomainError;

use super::engagement_tracker::EngagementTracker;
use crate::application::config::ConversionRules;

const SIGNUP_SOURCE: &str = "Email Signup";

/// What became of a capture-form submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Accepted by the list provider; the subscriber is logged and credited
    Subscribed,
    /// Declined or errored; inline feedback shown, no retry
    Failed,
}

/// Email capture application service
///
/// Runs the signup flow against the pluggable submission gateway and owns
/// the two one-shot engagement prompts of the capture funnel.
pub struct EmailCaptureService {
    tracker: Arc<EngagementTracker>,
    gateway: Arc<dyn SubmissionGateway>,
    subscribers: Arc<dyn SubscriberRepository>,
    presenter: Arc<dyn NotificationPresenter>,
    signup_value: f64,
    exit_prompt_shown: AtomicBool,
    scroll_banner_shown: AtomicBool,
}

impl EmailCaptureService {
    pub fn new(
        tracker: Arc<EngagementTracker>,
        gateway: Arc<dyn SubmissionGateway>,
        subscribers: Arc<dyn SubscriberRepository>,
        presenter: Arc<dyn NotificationPresenter>,
        rules: &ConversionRules,
    ) -> Self {
        Self {
            tracker,
            gateway,
            subscribers,
            presenter,
            signup_value: rules.email_signup_value,
            exit_prompt_shown: AtomicBool::new(false),
            scroll_banner_shown: AtomicBool::new(false),
        }
    }

    /// Handle a capture-form submission end to end. A gateway failure is
    /// surfaced as inline feedback and `Failed`, never as an error; only
    /// invalid input and repository trouble propagate.
    pub async fn handle_submission(
        &self,
        email: &str,
        name: Option<&str>,
    ) -> Result<CaptureOutcome, DomainError> {
        let subscriber = Subscriber::new(email, name)?;

        let request = SubmissionRequest {
            email: subscriber.email().to_string(),
            name: subscriber.name().map(str::to_string),
        };

        info!("Submitting signup for {}", subscriber.email());
        match self.gateway.submit(&request).await {
            Ok(receipt) if receipt.accepted => {
                self.subscribers.append(&subscriber).await?;
                self.tracker.credit(self.signup_value, SIGNUP_SOURCE).await?;
                self.presenter.form_feedback(&FormFeedback::Success);
                Ok(CaptureOutcome::Subscribed)
            }
            Ok(receipt) => {
                warn!("List provider declined signup: {}", receipt.message);
                self.presenter.form_feedback(&FormFeedback::Failure);
                Ok(CaptureOutcome::Failed)
            }
            Err(e) => {
                warn!("Email signup failed: {}", e);
                self.presenter.form_feedback(&FormFeedback::Failure);
                Ok(CaptureOutcome::Failed)
            }
        }
    }

    /// Exit-intent prompt, at most once per session
    pub fn on_pointer_exit(&self) {
        if !self.exit_prompt_shown.swap(true, Ordering::Relaxed) {
            self.presenter.exit_prompt();
        }
    }

    /// Scroll-trigger banner, at most once, the first time depth passes 50%
    pub fn on_scroll(&self, percent: f64) {
        if percent > 50.0 && !self.scroll_banner_shown.swap(true, Ordering::Relaxed) {
            self.presenter.scroll_banner();
        }
    }
}
