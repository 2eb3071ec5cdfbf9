pub mod cli;
pub mod core;
pub mod notify;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::notify::{ConsoleNotifier, Notifier, SmtpNotifier};
use crate::providers::YahooFinanceProvider;
use crate::store::CsvRecordStore;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::time::Duration;
use tracing::{debug, info};

const DEFAULT_YAHOO_URL: &str = "https://query1.finance.yahoo.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Show the month's plan without recording or sending it
    Plan { date: Option<NaiveDate> },
    /// Plan, record and send the month's contribution
    Run { date: Option<NaiveDate> },
    /// Show the recorded contributions
    History,
}

fn build_notifier(config: &AppConfig) -> Result<Box<dyn Notifier>> {
    match &config.email {
        Some(email) => Ok(Box::new(SmtpNotifier::new(&email.resolve()?)?)),
        None => {
            info!("No email section configured, printing summary instead");
            Ok(Box::new(ConsoleNotifier))
        }
    }
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Contribution planner starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let (base_url, timeout_secs) = config
        .providers
        .yahoo
        .as_ref()
        .map_or((DEFAULT_YAHOO_URL, 10), |p| (p.base_url.as_str(), p.timeout_secs));
    let provider = YahooFinanceProvider::new(base_url, Duration::from_secs(timeout_secs));
    let store = CsvRecordStore::new(config.record_path()?);
    let today = Local::now().date_naive();

    match command {
        AppCommand::Plan { date } => {
            cli::plan::run(
                date.unwrap_or(today),
                config.budget,
                &config.universe,
                &provider,
            )
            .await
        }
        AppCommand::Run { date } => {
            let notifier = build_notifier(&config)?;
            cli::run::run(
                date.unwrap_or(today),
                config.budget,
                &config.universe,
                &provider,
                &store,
                notifier.as_ref(),
            )
            .await
            .map(|_| ())
        }
        AppCommand::History => cli::history::run(&store).await,
    }
}
