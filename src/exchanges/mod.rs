//! Exchange adapter registry and factory
//!
//! This module provides:
//! - Central registration of all supported exchanges
//! - A factory function to resolve adapters by configured name
//!
//! All exchange-specific logic must live in dedicated adapter modules.
//! The rest of the application must interact exclusively through
//! the `ExchangeAdapter` trait.

pub mod adapter;
pub mod binanceus;
pub mod bitstamp;
pub mod coinbase;
pub mod cryptocom;
pub mod gemini;
pub mod kraken;
pub mod kucoin;

use std::sync::Arc;

use crate::config::{ExchangeConfig, HttpConfig};
use adapter::{ExchangeAdapter, Venue};

/// Names accepted in `exchange.name`.
pub const SUPPORTED: [&str; 7] = [
    "binanceus",
    "bitstamp",
    "coinbase",
    "cryptocom",
    "gemini",
    "kraken",
    "kucoin",
];

/// Returns an exchange adapter for one configured exchange.
///
/// PARAMETERS:
/// - `cfg`: exchange entry from config.json (name, label/URL overrides)
/// - `http`: client settings; Gemini reads its detail fan-out here
///
/// RETURNS:
/// - `Some(Arc<dyn ExchangeAdapter>)` if the exchange is supported
/// - `None` if the name is unknown
///
pub fn get_adapter(cfg: &ExchangeConfig, http: &HttpConfig) -> Option<Arc<dyn ExchangeAdapter>> {
    let venue = |label: &str, base_url: &str| Venue::from_config(cfg, label, base_url);

    match cfg.name.to_lowercase().as_str() {
        "binanceus" => Some(Arc::new(binanceus::BinanceUsAdapter::new(
            venue(binanceus::LABEL, binanceus::BASE_URL),
        ))),
        "bitstamp" => Some(Arc::new(bitstamp::BitstampAdapter::new(
            venue(bitstamp::LABEL, bitstamp::BASE_URL),
        ))),
        "coinbase" => Some(Arc::new(coinbase::CoinbaseAdapter::new(
            venue(coinbase::LABEL, coinbase::BASE_URL),
        ))),
        "cryptocom" => Some(Arc::new(cryptocom::CryptoComAdapter::new(
            venue(cryptocom::LABEL, cryptocom::BASE_URL),
        ))),
        "gemini" => Some(Arc::new(gemini::GeminiAdapter::new(
            venue(gemini::LABEL, gemini::BASE_URL),
            http.detail_concurrency,
        ))),
        "kraken" => Some(Arc::new(kraken::KrakenAdapter::new(
            venue(kraken::LABEL, kraken::BASE_URL),
        ))),
        "kucoin" => Some(Arc::new(kucoin::KucoinAdapter::new(
            venue(kucoin::LABEL, kucoin::BASE_URL),
        ))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_every_supported_name() {
        let http = HttpConfig::default();

        for name in SUPPORTED {
            let adapter = get_adapter(&ExchangeConfig::new(name), &http)
                .unwrap_or_else(|| panic!("{name} not registered"));
            assert_eq!(adapter.name(), name);
            assert!(adapter.listing_url().starts_with("https://"));
        }
    }

    #[test]
    fn default_labels() {
        let http = HttpConfig::default();
        let label = |n: &str| get_adapter(&ExchangeConfig::new(n), &http).unwrap().label().to_string();

        assert_eq!(label("cryptocom"), "Crypto.com");
        assert_eq!(label("binanceus"), "Binance.US");
        assert_eq!(label("gemini"), "Gemini");
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(get_adapter(&ExchangeConfig::new("mtgox"), &HttpConfig::default()).is_none());
    }
}
