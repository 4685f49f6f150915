//! Currency value types shared by providers and the rate client.

use anyhow::{Result, bail};
use chrono::NaiveDate;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub name: String,
}

impl Currency {
    pub fn new(code: &str, name: &str) -> Self {
        Currency {
            code: code.to_string(),
            name: name.to_string(),
        }
    }

    /// Builds a currency known only by its code. The code doubles as the name.
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_uppercase();
        Currency {
            name: code.clone(),
            code,
        }
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.code, self.name)
    }
}

/// Ordered set of known currencies. Codes are unique; order follows the
/// service response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrencyCatalog {
    currencies: Vec<Currency>,
}

impl CurrencyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a currency. A code already present keeps its position and
    /// takes the new name; returns false in that case.
    pub fn insert(&mut self, currency: Currency) -> bool {
        match self.currencies.iter_mut().find(|c| c.code == currency.code) {
            Some(existing) => {
                existing.name = currency.name;
                false
            }
            None => {
                self.currencies.push(currency);
                true
            }
        }
    }

    pub fn find(&self, code: &str) -> Option<&Currency> {
        let code = code.trim();
        self.currencies
            .iter()
            .find(|c| c.code.eq_ignore_ascii_case(code))
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Currency> {
        self.currencies.iter()
    }

    pub fn to_vec(&self) -> Vec<Currency> {
        self.currencies.clone()
    }
}

impl From<IndexMap<String, String>> for CurrencyCatalog {
    fn from(entries: IndexMap<String, String>) -> Self {
        let mut catalog = CurrencyCatalog::new();
        for (code, name) in entries {
            catalog.insert(Currency { code, name });
        }
        catalog
    }
}

impl FromIterator<Currency> for CurrencyCatalog {
    fn from_iter<I: IntoIterator<Item = Currency>>(iter: I) -> Self {
        let mut catalog = CurrencyCatalog::new();
        for currency in iter {
            catalog.insert(currency);
        }
        catalog
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: Decimal,
    pub from: Currency,
    pub to: Currency,
}

impl ConversionRequest {
    pub fn new(amount: Decimal, from: Currency, to: Currency) -> Result<Self> {
        if amount <= Decimal::ZERO {
            bail!("Amount must be positive, got {}", amount);
        }
        Ok(ConversionRequest { amount, from, to })
    }
}

/// Rate for a currency pair as reported for a calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub date: NaiveDate,
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
}
