//! Rate service abstractions

use crate::core::currency::{ConversionRequest, Currency, CurrencyCatalog, RateSnapshot};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetches the catalog of supported currencies.
    async fn fetch_currencies(&self) -> Result<CurrencyCatalog>;

    /// Converts `request.amount` at the latest available rate.
    async fn fetch_conversion(&self, request: &ConversionRequest) -> Result<Decimal>;

    /// Fetches the rate for a pair on the given date.
    async fn fetch_rate(&self, date: NaiveDate, from: &Currency, to: &Currency)
    -> Result<RateSnapshot>;
}
