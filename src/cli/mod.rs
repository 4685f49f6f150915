//! Command-line front end over the rate client.

pub mod convert;
pub mod currencies;
pub mod rate;
pub mod setup;
pub mod ui;

use crate::core::{Currency, RateClient};
use anyhow::{Result, anyhow};
use tracing::warn;

/// Resolves user supplied codes against the service catalog.
///
/// When the catalog cannot be loaded the codes are used as given and the
/// service decides whether they are valid.
pub async fn resolve_pair(client: &RateClient, from: &str, to: &str) -> Result<(Currency, Currency)> {
    let pb = ui::new_spinner("Loading currencies");
    let currencies = client.load_currencies().await;
    pb.finish_and_clear();

    if currencies.is_empty() {
        warn!("Currency catalog unavailable, using codes as given");
        return Ok((Currency::from_code(from), Currency::from_code(to)));
    }

    let resolve = |code: &str| {
        client
            .find_currency(code)
            .ok_or_else(|| anyhow!("Unknown currency: {}", code.trim().to_uppercase()))
    };
    Ok((resolve(from)?, resolve(to)?))
}
