use std::sync::atomic::Ordering;

use log::debug;
use serde_json::Value;

use crate::{
    config::ExchangeConfig,
    error::FetchError,
    http::JsonSource,
    metrics::METRICS,
    schema::Symbol,
};

/// Identity and endpoint of one configured exchange.
///
/// `label` is the key under which the exchange's tickers land in
/// the directory. `base_url` has no trailing slash.
#[derive(Debug, Clone)]
pub struct Venue {
    pub label: String,
    pub base_url: String,
}

impl Venue {
    /// Applies config overrides on top of an adapter's defaults.
    pub fn from_config(cfg: &ExchangeConfig, default_label: &str, default_base_url: &str) -> Self {
        let base_url = cfg
            .base_url
            .as_deref()
            .unwrap_or(default_base_url)
            .trim_end_matches('/')
            .to_string();

        Self {
            label: cfg.label.clone().unwrap_or_else(|| default_label.to_string()),
            base_url,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// ExchangeAdapter is the core abstraction layer between:
/// - The generic collector runtime
/// - Exchange-specific instrument-listing APIs
///
/// Each exchange implementation must:
/// - Know where its listing lives
/// - Parse the raw listing
/// - Normalize instruments into canonical `Symbol` records
///
/// DESIGN GOALS:
/// - Zero exchange-specific logic outside adapters
/// - One adapter per exchange
/// - Uniform output format across all exchanges
///
/// THREAD SAFETY:
/// - Must be Send + Sync
/// - Adapter instances are shared across tasks
///
#[async_trait::async_trait]
pub trait ExchangeAdapter: Send + Sync {

    /// Returns the stable adapter identifier.
    ///
    /// CONTRACT:
    /// - Must match `exchange.name` in configuration
    /// - Lowercase, no spaces
    ///
    /// EXAMPLES:
    /// - "gemini"
    /// - "cryptocom"
    ///
    fn name(&self) -> &'static str;

    /// Returns the directory key for this exchange (e.g. "Crypto.com").
    fn label(&self) -> &str;

    /// Returns the primary listing endpoint.
    fn listing_url(&self) -> String;

    /// Parses a raw listing into canonical records.
    ///
    /// IMPORTANT:
    /// - This function must NEVER perform I/O
    /// - An unexpected top-level shape is an exchange-level
    ///   `FetchError::Malformed`
    /// - An instrument with a missing field is dropped, the rest
    ///   of the listing still parses
    ///
    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError>;

    /// Fetches the listing and yields canonical records.
    ///
    /// Every call re-issues the network request; nothing is cached.
    /// Exchanges that need per-instrument follow-up calls override
    /// this.
    async fn fetch(&self, http: &dyn JsonSource) -> Result<Vec<Symbol>, FetchError> {
        let raw = http.get_json(&self.listing_url()).await?;
        self.parse_listing(&raw)
    }
}

/// Keeps complete records, logging and counting dropped instruments.
pub(crate) fn keep_complete<I>(label: &str, items: I) -> Vec<Symbol>
where
    I: IntoIterator<Item = Option<Symbol>>,
{
    let mut out = Vec::new();
    let mut dropped = 0usize;

    for item in items {
        match item {
            Some(symbol) => out.push(symbol),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!("[{label}] dropped {dropped} incomplete instruments");
        METRICS.instruments_dropped.fetch_add(dropped, Ordering::Relaxed);
    }

    out
}

/// The array under `raw` (or `raw` itself when `key` is `None`).
pub(crate) fn expect_array<'a>(
    label: &str,
    raw: &'a Value,
    key: Option<&str>,
) -> Result<&'a Vec<Value>, FetchError> {
    let target = match key {
        Some(k) => raw
            .get(k)
            .ok_or_else(|| FetchError::malformed(label, format!("missing `{k}`")))?,
        None => raw,
    };

    target
        .as_array()
        .ok_or_else(|| FetchError::malformed(label, "expected an instrument array"))
}
