use crate::core::cache::Cache;
use crate::core::currency::{ConversionRequest, Currency, CurrencyCatalog, RateSnapshot};
use crate::core::provider::RateProvider;
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

const CATALOG_KEY: &str = "catalog";

/// Caches the currency catalog and dated rates of an inner provider.
///
/// Latest conversions always go to the inner provider. Failures are not
/// cached, so a failed lookup is retried on the next call.
pub struct CachingRateProvider<P: RateProvider> {
    inner: P,
    catalog: Cache<&'static str, CurrencyCatalog>,
    rates: Cache<String, RateSnapshot>,
}

impl<P: RateProvider> CachingRateProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            catalog: Cache::new(),
            rates: Cache::new(),
        }
    }

    fn rate_key(date: NaiveDate, from: &Currency, to: &Currency) -> String {
        format!("{}:{}-{}", date.format("%Y-%m-%d"), from.code, to.code)
    }
}

#[async_trait]
impl<P: RateProvider> RateProvider for CachingRateProvider<P> {
    async fn fetch_currencies(&self) -> Result<CurrencyCatalog> {
        if let Some(cached) = self.catalog.get(&CATALOG_KEY).await {
            return Ok(cached);
        }
        let catalog = self.inner.fetch_currencies().await?;
        if !catalog.is_empty() {
            self.catalog.put(CATALOG_KEY, catalog.clone()).await;
        }
        Ok(catalog)
    }

    async fn fetch_conversion(&self, request: &ConversionRequest) -> Result<Decimal> {
        self.inner.fetch_conversion(request).await
    }

    async fn fetch_rate(
        &self,
        date: NaiveDate,
        from: &Currency,
        to: &Currency,
    ) -> Result<RateSnapshot> {
        let key = Self::rate_key(date, from, to);
        if let Some(cached) = self.rates.get(&key).await {
            debug!("Cache hit for rate: {}", key);
            return Ok(cached);
        }
        debug!("Cache miss for rate: {}", key);
        let snapshot = self.inner.fetch_rate(date, from, to).await?;
        self.rates.put(key, snapshot.clone()).await;
        Ok(snapshot)
    }
}
