mod config;
mod constants;
mod messaging;
mod models;
mod services;
mod sheet;
mod telegram;
mod utils;

use tracing::{error, info};

use crate::config::Config;
use crate::constants::{LOG_DIRECTIVE, WORKBOOK_PATH};
use crate::models::RunSummary;
use crate::services::delivery::{birthdays_on, deliver_all};
use crate::sheet::load_contacts;
use crate::telegram::TelegramSession;
use crate::utils::datetime::current_month_day;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    match run(&config).await {
        Ok(summary) => {
            info!(
                "Run finished: {} row(s) processed, {} message(s) sent, {} failed, {} row(s) skipped",
                summary.rows(),
                summary.sent(),
                summary.failed(),
                summary.skipped()
            );
        }
        Err(e) => {
            error!("Run failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Initialize the logging system
fn initialize_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive")),
        )
        .init();
}

/// Open the Telegram session, deliver today's greetings and close the
/// session again.
///
/// The session is closed exactly once on every path after a successful
/// open, including a spreadsheet load failure and the no-birthdays case.
async fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let session = TelegramSession::open(config).await?;

    let delivery = deliver_today(&session, config).await;
    let closed = session.close();

    let summary = delivery?;
    closed?;
    Ok(summary)
}

/// Load the contact table and send greetings to every row whose birthday
/// matches today's month and day
async fn deliver_today(session: &TelegramSession, config: &Config) -> anyhow::Result<RunSummary> {
    let table = load_contacts(WORKBOOK_PATH)?;
    info!("Loaded {} contact(s) from {}", table.len(), WORKBOOK_PATH);

    // Capture the reference date once, so a run crossing midnight still
    // uses a single consistent "today"
    let (month, day) = current_month_day();
    let matches = birthdays_on(&table, month, day);

    if matches.is_empty() {
        info!("No birthdays today.");
        return Ok(RunSummary::default());
    }

    info!("Found {} birthday(s) today", matches.len());
    Ok(deliver_all(session, config.resolver, &matches).await)
}
