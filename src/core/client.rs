//! Rate client: the single entry point callers use for currency lookups.
//!
//! Every operation absorbs provider failures. They are logged and surfaced
//! as `None` or an empty list, so one failed request never ends the session
//! and any call can simply be repeated.

use crate::core::clock::{Clock, SystemClock};
use crate::core::currency::{ConversionRequest, Currency, CurrencyCatalog, RateSnapshot};
use crate::core::provider::RateProvider;
use crate::providers::frankfurter::FrankfurterProvider;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::sync::{Arc, OnceLock};
use tracing::{debug, instrument, warn};

pub struct RateClient {
    provider: Arc<dyn RateProvider>,
    clock: Arc<dyn Clock>,
    known: OnceLock<CurrencyCatalog>,
}

impl RateClient {
    /// Creates a client talking to a Frankfurter-compatible service at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self::with_provider(
            Arc::new(FrankfurterProvider::new(base_url)),
            Arc::new(SystemClock),
        )
    }

    pub fn with_provider(provider: Arc<dyn RateProvider>, clock: Arc<dyn Clock>) -> Self {
        RateClient {
            provider,
            clock,
            known: OnceLock::new(),
        }
    }

    /// Loads the currency catalog. Failures yield an empty list.
    ///
    /// The first non-empty catalog becomes the client's known currency set.
    #[instrument(name = "LoadCurrencies", skip(self))]
    pub async fn load_currencies(&self) -> Vec<Currency> {
        match self.provider.fetch_currencies().await {
            Ok(catalog) => {
                debug!(count = catalog.len(), "Loaded currency catalog");
                let currencies = catalog.to_vec();
                if !catalog.is_empty() {
                    let _ = self.known.set(catalog);
                }
                currencies
            }
            Err(e) => {
                warn!(error = ?e, "Failed to load currencies");
                Vec::new()
            }
        }
    }

    /// The client's notion of today's date.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn yesterday(&self) -> NaiveDate {
        self.clock.yesterday()
    }

    pub fn find_currency(&self, code: &str) -> Option<Currency> {
        self.known.get().and_then(|c| c.find(code)).cloned()
    }

    /// Converts `amount` from one currency to another at the latest rate.
    ///
    /// Identical currencies return `amount` exactly, without a request.
    #[instrument(
        name = "Convert",
        skip(self, from, to),
        fields(from = %from.code, to = %to.code)
    )]
    pub async fn convert(&self, amount: Decimal, from: &Currency, to: &Currency) -> Option<Decimal> {
        if from.code == to.code {
            return Some(amount);
        }

        let request = match ConversionRequest::new(amount, from.clone(), to.clone()) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Rejected conversion request");
                return None;
            }
        };

        match self.provider.fetch_conversion(&request).await {
            Ok(converted) => Some(converted),
            Err(e) => {
                warn!(error = ?e, "Conversion failed");
                None
            }
        }
    }

    /// Rate for the pair on `date`, or `None` when the lookup fails.
    pub async fn get_exchange_rate(
        &self,
        date: NaiveDate,
        from: &Currency,
        to: &Currency,
    ) -> Option<Decimal> {
        self.get_rate_snapshot(date, from, to)
            .await
            .map(|snapshot| snapshot.rate)
    }

    #[instrument(
        name = "RateSnapshot",
        skip(self, date, from, to),
        fields(date = %date, from = %from.code, to = %to.code)
    )]
    pub async fn get_rate_snapshot(
        &self,
        date: NaiveDate,
        from: &Currency,
        to: &Currency,
    ) -> Option<RateSnapshot> {
        if from.code == to.code {
            return Some(RateSnapshot {
                date,
                from: from.clone(),
                to: to.clone(),
                rate: Decimal::ONE,
            });
        }

        match self.provider.fetch_rate(date, from, to).await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!(error = ?e, "Exchange rate lookup failed");
                None
            }
        }
    }

    /// Today's rate minus yesterday's rate for the pair.
    ///
    /// Lookups run one after the other, today first. Either failing yields `None`.
    pub async fn get_rate_delta(&self, from: &Currency, to: &Currency) -> Option<Decimal> {
        let today = self.today();
        let yesterday = self.yesterday();

        let rate_today = self.get_exchange_rate(today, from, to).await?;
        let rate_yesterday = self.get_exchange_rate(yesterday, from, to).await?;

        debug!(%rate_today, %rate_yesterday, "Computed rate delta");
        Some(rate_today - rate_yesterday)
    }
}
