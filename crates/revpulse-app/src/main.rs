use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, warn};

use revpulse_app::application::config::ConversionRules;
use revpulse_app::bootstrap;
use revpulse_domain::shared::DomainError;

#[tokio::main]
async fn main() -> Result<()> {
    let started = Instant::now();

    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revpulse");
    revpulse_infrastructure::logging::init_logger(data_dir.join("logs"))?;

    let rules = ConversionRules::load(&data_dir.join("rules.json"));
    let db_path = data_dir.join("revpulse.db");
    let services = bootstrap::build(
        db_path.to_str().context("Data directory path is not UTF-8")?,
        rules.clone(),
    )
    .await?;

    // Landing on the page is itself a view, and startup cost is our load time
    report("page view", services.affiliate.record_page_view().await);
    services.monitor.record_page_load(started.elapsed()).await;

    println!("revpulse - commands:");
    println!("  signup <email> [name]     capture an email signup");
    println!("  click <url> [product]     record an affiliate link click");
    println!("  purchase                  record a course purchase");
    println!("  view                      record a page view");
    println!("  scroll <percent>          report scroll depth");
    println!("  exit-intent               simulate the pointer leaving the page");
    println!("  status                    show today's progress");
    println!("  quit");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "signup" => match parts.next() {
                Some(email) => {
                    let name = parts.next();
                    report(
                        "signup",
                        services.capture.handle_submission(email, name).await,
                    );
                }
                None => println!("usage: signup <email> [name]"),
            },
            "click" => match parts.next() {
                Some(url) => {
                    let product = parts.next();
                    report("click", services.affiliate.handle_click(url, product).await);
                }
                None => println!("usage: click <url> [product]"),
            },
            "purchase" => report(
                "purchase",
                services
                    .tracker
                    .credit(rules.course_purchase_value, "Course Purchase")
                    .await,
            ),
            "view" => match services.affiliate.record_page_view().await {
                Ok(total) => println!("{} page views so far", total),
                Err(e) => report::<u64>("page view", Err(e)),
            },
            "scroll" => match parts.next().and_then(|p| p.parse::<f64>().ok()) {
                Some(percent) => {
                    services.capture.on_scroll(percent);
                    services.monitor.record_scroll_depth(percent).await;
                }
                None => println!("usage: scroll <percent>"),
            },
            "exit-intent" => services.capture.on_pointer_exit(),
            "status" => {
                let snapshot = services.tracker.snapshot().await;
                println!(
                    "${:.2} of ${:.2} ({:.0}%)",
                    snapshot.current_value, snapshot.daily_goal, snapshot.percent
                );
            }
            "quit" | "exit" => break,
            other => println!("unknown command: {}", other),
        }
    }

    services.monitor.record_session_end(started.elapsed()).await;
    services.tracker.shutdown().await;

    Ok(())
}

/// Log a failed operation without interrupting the loop; only validation
/// and persistence trouble is worth an error-level entry.
fn report<T>(context: &str, result: Result<T, DomainError>) {
    if let Err(e) = result {
        if e.is_recoverable() {
            warn!("{} degraded: {}", context, e);
        } else {
            error!("{} failed: {}", context, e);
        }
        println!("{} failed: {}", context, e.message());
    }
}
