/// E2E Test: Complete Engagement Flow
///
/// Validates the full flow over in-memory collaborators:
/// 1. Initialize the tracker from an empty store
/// 2. Capture an email signup (simulated gateway)
/// 3. Record affiliate clicks until the daily goal is crossed
/// 4. Hit a page-view milestone
/// 5. Reload into a fresh tracker and verify the persisted total
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::time::Duration;

use revpulse_app::application::config::ConversionRules;
use revpulse_app::application::services::{
    AffiliateTrackerService, CaptureOutcome, EmailCaptureService, EngagementTracker,
};
use revpulse_domain::capture::SubscriberRepository;
use revpulse_domain::ledger::LedgerRepository;
use revpulse_infrastructure::persistence::memory::{
    InMemoryAffiliateClickRepository, InMemoryLedgerRepository, InMemoryPageViewRepository,
    InMemorySubscriberRepository,
};
use revpulse_infrastructure::render::TerminalSurface;
use revpulse_infrastructure::submission::SimulatedSubmissionGateway;

/// Writer that mirrors the surface output into a shared buffer
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn e2e_complete_engagement_flow() {
    // ============================================================
    // Setup: in-memory store and a captured terminal surface
    // ============================================================
    let rules = ConversionRules::default();
    let ledger_repo = Arc::new(InMemoryLedgerRepository::new());
    let subscriber_repo = Arc::new(InMemorySubscriberRepository::new());
    let click_repo = Arc::new(InMemoryAffiliateClickRepository::new());
    let page_view_repo = Arc::new(InMemoryPageViewRepository::new());

    let output = Arc::new(Mutex::new(Vec::new()));
    let surface = Arc::new(TerminalSurface::with_writer(Box::new(SharedBuf(
        output.clone(),
    ))));

    let tracker = Arc::new(EngagementTracker::new(
        ledger_repo.clone(),
        surface.clone(),
        surface.clone(),
        None,
        rules.daily_goal,
    ));

    // ============================================================
    // Step 1: Initialize from the empty store
    // ============================================================
    tracker.initialize().await;
    let snapshot = tracker.snapshot().await;
    assert_eq!(snapshot.current_value, 0.0);
    assert_eq!(snapshot.daily_goal, 100.0);
    assert_eq!(snapshot.percent, 0.0);

    println!("✓ Step 1: Tracker initialized at $0.00");

    // ============================================================
    // Step 2: Capture an email signup
    // ============================================================
    let capture = EmailCaptureService::new(
        tracker.clone(),
        Arc::new(SimulatedSubmissionGateway::new(Duration::from_millis(5))),
        subscriber_repo.clone(),
        surface.clone(),
        &rules,
    );

    let outcome = capture
        .handle_submission("reader@example.com", Some("Reader"))
        .await
        .expect("Submission should succeed");
    assert_eq!(outcome, CaptureOutcome::Subscribed);
    assert_eq!(subscriber_repo.count().await.unwrap(), 1);
    assert_eq!(tracker.snapshot().await.current_value, 50.0);

    println!("✓ Step 2: Signup captured, $50.00 credited");

    // ============================================================
    // Step 3: Affiliate clicks cross the daily goal
    // ============================================================
    let affiliate = AffiliateTrackerService::new(
        tracker.clone(),
        click_repo.clone(),
        page_view_repo.clone(),
        None,
        &rules,
    );

    affiliate
        .handle_click("https://teachable.com/course?ref=rp", None)
        .await
        .unwrap();
    assert_eq!(tracker.snapshot().await.current_value, 75.0);

    affiliate
        .handle_click("https://www.shopify.com/plans?ref=rp", None)
        .await
        .unwrap();
    assert_eq!(tracker.snapshot().await.current_value, 100.0);

    let rendered = String::from_utf8(output.lock().unwrap().clone()).unwrap();
    assert!(
        rendered.contains("Daily Goal Reached"),
        "Goal dialog should have been shown"
    );
    assert_eq!(
        rendered.matches("Daily Goal Reached").count(),
        1,
        "Goal dialog fires once"
    );

    println!("✓ Step 3: Goal crossed at $100.00, dialog shown once");

    // ============================================================
    // Step 4: Page views up to a milestone
    // ============================================================
    let milestone_rules = ConversionRules {
        page_view_milestone: 4,
        ..ConversionRules::default()
    };
    let affiliate = AffiliateTrackerService::new(
        tracker.clone(),
        click_repo,
        page_view_repo,
        None,
        &milestone_rules,
    );

    for _ in 0..3 {
        affiliate.record_page_view().await.unwrap();
    }
    assert_eq!(tracker.snapshot().await.current_value, 100.0);
    affiliate.record_page_view().await.unwrap();
    assert_eq!(tracker.snapshot().await.current_value, 110.0);

    println!("✓ Step 4: View milestone credited ad revenue");

    // ============================================================
    // Step 5: Reload and verify persistence
    // ============================================================
    tracker.shutdown().await;

    let stored = ledger_repo.load().await.unwrap().expect("State should exist");
    assert_eq!(stored.current_value, 110.0);

    let reloaded = EngagementTracker::new(
        ledger_repo,
        surface.clone(),
        surface,
        None,
        milestone_rules.daily_goal,
    );
    reloaded.initialize().await;
    assert_eq!(reloaded.snapshot().await.current_value, 110.0);

    println!("✓ Step 5: Reload sees the persisted $110.00");
}
