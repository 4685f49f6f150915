//! Core business logic abstractions

pub mod cache;
pub mod client;
pub mod clock;
pub mod config;
pub mod currency;
pub mod log;
pub mod provider;

// Re-export main types for cleaner imports
pub use client::RateClient;
pub use clock::{Clock, FixedClock, SystemClock};
pub use currency::{ConversionRequest, Currency, CurrencyCatalog, RateSnapshot};
pub use provider::RateProvider;
