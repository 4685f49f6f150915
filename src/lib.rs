pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{Clock, FixedClock, RateClient, SystemClock};
use crate::providers::{caching::CachingRateProvider, frankfurter::FrankfurterProvider};
use anyhow::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Currencies,
    Convert {
        amount: Decimal,
        from: String,
        to: String,
    },
    Rate {
        from: String,
        to: String,
        date: Option<NaiveDate>,
    },
    Change {
        from: String,
        to: String,
        as_of: Option<NaiveDate>,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("xconv starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let frankfurter = &config.providers.frankfurter;
    let provider = CachingRateProvider::new(FrankfurterProvider::with_timeout(
        &frankfurter.base_url,
        frankfurter.timeout(),
    ));
    let clock: Arc<dyn Clock> = match &command {
        AppCommand::Change {
            as_of: Some(date), ..
        } => Arc::new(FixedClock(*date)),
        _ => Arc::new(SystemClock),
    };
    let client = RateClient::with_provider(Arc::new(provider), clock);

    match command {
        AppCommand::Currencies => cli::currencies::run(&client).await,
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&client, &config.display, amount, &from, &to).await
        }
        AppCommand::Rate { from, to, date } => {
            cli::rate::run_rate(&client, &config.display, &from, &to, date).await
        }
        AppCommand::Change { from, to, .. } => {
            cli::rate::run_change(&client, &config.display, &from, &to).await
        }
    }
}
