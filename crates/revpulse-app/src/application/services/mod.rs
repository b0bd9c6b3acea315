mod affiliate_service;
mod capture_service;
mod engagement_monitor;
mod engagement_tracker;


pub use affiliate_service::AffiliateTrackerService;
pub use capture_service::{CaptureOutcome, EmailCaptureService};
pub use engagement_monitor::EngagementMonitor;
pub use engagement_tracker::EngagementTracker;
