//! Tabsplit CLI
//!
//! Reads a bill request as JSON (from a file argument or stdin), runs the
//! split engine with the configured service fee, and prints the computed
//! bill as JSON.

use std::fs;
use std::io::Read;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tabsplit_core::billing::{BillRequest, BillSplitService};
use tabsplit_shared::AppConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabsplit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;
    info!(
        service_fee_percent = %config.billing.service_fee_percent,
        "Configuration loaded"
    );

    let request = read_request().context("Failed to read bill request")?;

    let service = BillSplitService::new(config.billing.service_fee_percent);
    let response = service.split(&request).context("Bill request rejected")?;

    info!(
        items_total = %response.items_total,
        total_to_pay = %response.total_to_pay,
        participants = response.shares.len(),
        "Bill split computed"
    );

    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// Reads the bill request from the first CLI argument (a JSON file path)
/// or, if absent, from stdin.
fn read_request() -> anyhow::Result<BillRequest> {
    let raw = match std::env::args().nth(1) {
        Some(path) => {
            fs::read_to_string(&path).with_context(|| format!("Cannot read request file {path}"))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Cannot read request from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&raw).context("Invalid bill request JSON")
}
