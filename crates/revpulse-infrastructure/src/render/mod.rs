use std::io::Write;
use std::sync::Mutex;

use revpulse_domain::ledger::ProgressSnapshot;
use revpulse_domain::render::{FormFeedback, NotificationPresenter, ProgressDisplay};

const BAR_WIDTH: usize = 24;

/// Terminal rendering surface
///
/// Implements both display traits over a single writer. Write failures are
/// swallowed: a broken surface degrades the page, it never interrupts it.
pub struct TerminalSurface {
    out: Mutex<Box<dyn Write + Send>>,
}

impl TerminalSurface {
    pub fn stdout() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(writer),
        }
    }

    fn write_line(&self, line: &str) {
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", line);
            let _ = out.flush();
        }
    }
}

impl ProgressDisplay for TerminalSurface {
    fn render(&self, snapshot: &ProgressSnapshot) {
        let filled = ((snapshot.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let filled = filled.min(BAR_WIDTH);

        let bar: String = "#".repeat(filled) + &"-".repeat(BAR_WIDTH - filled);
        self.write_line(&format!(
            "[{}] ${:.2} / ${:.2} ({:.0}%)",
            bar, snapshot.current_value, snapshot.daily_goal, snapshot.percent
        ));
    }
}

impl NotificationPresenter for TerminalSurface {
    fn credit_toast(&self, amount: f64, source: &str) {
        self.write_line(&format!("+${:.2} earned! ({})", amount, source));
    }

    fn goal_dialog(&self, total: f64) {
        self.write_line(&format!(
            "=== Daily Goal Reached! You've earned ${:.2} today. ===",
            total
        ));
    }

    fn form_feedback(&self, feedback: &FormFeedback) {
        match feedback {
            FormFeedback::Success => {
                self.write_line("Success! Check your email for the welcome kit.");
            }
            FormFeedback::Failure => {
                self.write_line("Something went wrong. Please try again.");
            }
        }
    }

    fn exit_prompt(&self) {
        self.write_line("Wait! Don't miss out - grab the free blueprint before you leave.");
    }

    fn scroll_banner(&self) {
        self.write_line("Limited time: free success kit - drop your email to get it.");
    }
}
