use crate::ledger::ProgressSnapshot;

/// Inline feedback shown next to the capture form after a submission
#[derive(Debug, Clone, PartialEq)]
pub enum FormFeedback {
    /// Submission accepted by the list provider
    Success,
    /// Submission failed; no retry is attempted
    Failure,
}

/// The progress indicator slots of the rendering surface.
///
/// Implementations mutate whatever stands in for the amount text and the bar
/// width. A surface missing its display slots renders nothing; that is never
/// an error.
pub trait ProgressDisplay: Send + Sync {
    fn render(&self, snapshot: &ProgressSnapshot);
}

/// Transient and modal notifications on the rendering surface.
///
/// Every method is fire-and-forget. Implementations absorb their own
/// failures; the tracker never learns whether a toast was actually shown.
pub trait NotificationPresenter: Send + Sync {
    /// Transient toast naming the credited amount and its source
    fn credit_toast(&self, amount: f64, source: &str);

    /// One-time congratulatory dialog when the daily goal is first reached
    fn goal_dialog(&self, total: f64);

    /// Inline capture-form feedback
    fn form_feedback(&self, feedback: &FormFeedback);

    /// Exit-intent prompt, shown at most once per session
    fn exit_prompt(&self);

    /// Scroll-trigger banner, shown at most once per session
    fn scroll_banner(&self);
}
