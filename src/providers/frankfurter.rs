use crate::core::currency::{ConversionRequest, Currency, CurrencyCatalog, RateSnapshot};
use crate::core::provider::RateProvider;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("xconv/", env!("CARGO_PKG_VERSION"));

/// Rate provider backed by a Frankfurter-compatible HTTP API.
pub struct FrankfurterProvider {
    base_url: String,
    timeout: Duration,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Requesting {}", url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(self.timeout)
            .build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to get response text for URL: {url}"))?;

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse JSON response for URL: {url}"))
    }
}

#[derive(Debug, Deserialize)]
struct RatesResponse {
    date: Option<NaiveDate>,
    rates: HashMap<String, Decimal>,
}

impl RatesResponse {
    fn rate_for(&self, from: &Currency, to: &Currency) -> Result<Decimal> {
        self.rates
            .get(&to.code)
            .copied()
            .ok_or_else(|| anyhow!("No rate found for currency pair: {}{}", from.code, to.code))
    }
}

#[async_trait]
impl RateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterCurrencies", skip(self))]
    async fn fetch_currencies(&self) -> Result<CurrencyCatalog> {
        let url = format!("{}/currencies", self.base_url);
        let entries: IndexMap<String, String> = self.get_json(&url).await?;
        Ok(CurrencyCatalog::from(entries))
    }

    #[instrument(
        name = "FrankfurterConvert",
        skip(self, request),
        fields(from = %request.from.code, to = %request.to.code)
    )]
    async fn fetch_conversion(&self, request: &ConversionRequest) -> Result<Decimal> {
        let url = format!(
            "{}/latest?amount={}&from={}&to={}",
            self.base_url, request.amount, request.from.code, request.to.code
        );
        let data: RatesResponse = self.get_json(&url).await?;
        data.rate_for(&request.from, &request.to)
    }

    #[instrument(
        name = "FrankfurterRate",
        skip(self, date, from, to),
        fields(date = %date, from = %from.code, to = %to.code)
    )]
    async fn fetch_rate(
        &self,
        date: NaiveDate,
        from: &Currency,
        to: &Currency,
    ) -> Result<RateSnapshot> {
        let url = format!(
            "{}/{}?from={}&to={}",
            self.base_url,
            date.format("%Y-%m-%d"),
            from.code,
            to.code
        );
        let data: RatesResponse = self.get_json(&url).await?;
        let rate = data.rate_for(from, to)?;

        Ok(RateSnapshot {
            date: data.date.unwrap_or(date),
            from: from.clone(),
            to: to.clone(),
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(request_path: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn usd() -> Currency {
        Currency::new("USD", "US Dollar")
    }

    fn eur() -> Currency {
        Currency::new("EUR", "Euro")
    }

    #[tokio::test]
    async fn test_fetch_currencies_keeps_order() {
        let mock_server = create_mock_server(
            "/currencies",
            200,
            r#"{"USD":"US Dollar","EUR":"Euro"}"#,
        )
        .await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let catalog = provider.fetch_currencies().await.unwrap();
        assert_eq!(
            catalog.to_vec(),
            vec![
                Currency::new("USD", "US Dollar"),
                Currency::new("EUR", "Euro")
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_currencies_repeated_code() {
        let mock_server = create_mock_server(
            "/currencies",
            200,
            r#"{"USD":"US Dollar","EUR":"Euro","USD":"Dollar"}"#,
        )
        .await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let catalog = provider.fetch_currencies().await.unwrap();
        assert_eq!(
            catalog.to_vec(),
            vec![Currency::new("USD", "Dollar"), Currency::new("EUR", "Euro")]
        );
    }

    #[tokio::test]
    async fn test_fetch_currencies_malformed() {
        let mock_server = create_mock_server("/currencies", 200, r#"["USD", "EUR"]"#).await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let result = provider.fetch_currencies().await;
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse JSON response")
        );
    }

    #[tokio::test]
    async fn test_fetch_conversion() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/latest"))
            .and(query_param("amount", "100"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"amount":100.0,"base":"USD","date":"2026-10-16","rates":{"EUR":92.5}}"#,
            ))
            .mount(&mock_server)
            .await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let request = ConversionRequest::new(dec!(100), usd(), eur()).unwrap();
        let converted = provider.fetch_conversion(&request).await.unwrap();
        assert_eq!(converted, dec!(92.5));
    }

    #[tokio::test]
    async fn test_fetch_conversion_missing_target_rate() {
        let mock_server =
            create_mock_server("/latest", 200, r#"{"rates":{"GBP":0.79}}"#).await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let request = ConversionRequest::new(dec!(1), usd(), eur()).unwrap();
        let result = provider.fetch_conversion(&request).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "No rate found for currency pair: USDEUR"
        );
    }

    #[tokio::test]
    async fn test_fetch_rate_uses_reported_date() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/2026-10-18"))
            .and(query_param("from", "USD"))
            .and(query_param("to", "EUR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"amount":1.0,"base":"USD","date":"2026-10-16","rates":{"EUR":1.1}}"#,
            ))
            .mount(&mock_server)
            .await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let requested = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let snapshot = provider.fetch_rate(requested, &usd(), &eur()).await.unwrap();
        assert_eq!(snapshot.rate, dec!(1.1));
        assert_eq!(snapshot.date, NaiveDate::from_ymd_opt(2026, 10, 16).unwrap());
        assert_eq!(snapshot.to.code, "EUR");
    }

    #[tokio::test]
    async fn test_fetch_rate_without_date_falls_back_to_requested() {
        let mock_server =
            create_mock_server("/2026-01-02", 200, r#"{"rates":{"EUR":0.91}}"#).await;
        let provider = FrankfurterProvider::new(&format!("{}/", mock_server.uri()));

        let requested = NaiveDate::from_ymd_opt(2026, 1, 2).unwrap();
        let snapshot = provider.fetch_rate(requested, &usd(), &eur()).await.unwrap();
        assert_eq!(snapshot.date, requested);
        assert_eq!(snapshot.rate, dec!(0.91));
    }

    #[tokio::test]
    async fn test_api_error_response() {
        let mock_server = create_mock_server("/2026-10-18", 500, "").await;
        let provider = FrankfurterProvider::new(&mock_server.uri());

        let requested = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let result = provider.fetch_rate(requested, &usd(), &eur()).await;
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("HTTP error: 500 Internal Server Error")
        );
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let provider = FrankfurterProvider::with_timeout(
            "http://127.0.0.1:1",
            Duration::from_millis(500),
        );

        let result = provider.fetch_currencies().await;
        assert!(result.unwrap_err().to_string().starts_with("Request error"));
    }
}
