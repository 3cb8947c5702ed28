use std::sync::atomic::Ordering;

use futures_util::{stream, StreamExt};
use log::{debug, warn};
use serde_json::Value;

use crate::{
    error::FetchError,
    http::JsonSource,
    metrics::METRICS,
    schema::Symbol,
    util,
};

use super::adapter::{expect_array, keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Gemini";
pub const BASE_URL: &str = "https://api.gemini.com";

/// Gemini REST adapter
///
/// REST:
/// GET /v1/symbols                   -> ["btcusd", "ethusd", ...]
/// GET /v1/symbols/details/{symbol}  -> { symbol, base_currency, quote_currency, ... }
///
/// Notes:
/// - The symbol list carries tickers only
/// - Currencies require one detail request per ticker
/// - Detail requests run with bounded parallelism
/// - A failed detail request skips that instrument only
pub struct GeminiAdapter {
    venue: Venue,
    detail_concurrency: usize,
}

impl GeminiAdapter {
    pub fn new(venue: Venue, detail_concurrency: usize) -> Self {
        Self {
            venue,
            detail_concurrency: detail_concurrency.max(1),
        }
    }

    fn details_url(&self, ticker: &str) -> String {
        self.venue.url(&format!("/v1/symbols/details/{ticker}"))
    }

    /// Ticker strings from the primary listing.
    fn parse_tickers(&self, raw: &Value) -> Result<Vec<String>, FetchError> {
        let items = expect_array(self.label(), raw, None)?;

        Ok(items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect())
    }
}

fn parse_details(item: &Value) -> Option<Symbol> {
    Symbol::new(
        util::str_field(item, "symbol")?,
        util::str_field(item, "base_currency")?,
        util::str_field(item, "quote_currency")?,
    )
}

#[async_trait::async_trait]
impl ExchangeAdapter for GeminiAdapter {

    fn name(&self) -> &'static str {
        "gemini"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/v1/symbols")
    }

    /// Parses an array of detail objects (one per instrument).
    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        let items = expect_array(self.label(), raw, None)?;
        Ok(keep_complete(self.label(), items.iter().map(parse_details)))
    }

    async fn fetch(&self, http: &dyn JsonSource) -> Result<Vec<Symbol>, FetchError> {
        let listing = http.get_json(&self.listing_url()).await?;
        let tickers = self.parse_tickers(&listing)?;

        debug!("[{}] fetching details for {} symbols", self.label(), tickers.len());

        let details: Vec<Value> = stream::iter(tickers)
            .map(move |ticker| async move {
                let url = self.details_url(&ticker);
                (ticker, http.get_json(&url).await)
            })
            .buffer_unordered(self.detail_concurrency)
            .filter_map(move |(ticker, result)| async move {
                match result {
                    Ok(v) => Some(v),
                    Err(e) => {
                        warn!("[{}] skipping {ticker}: {e}", self.label());
                        METRICS.detail_skipped.fetch_add(1, Ordering::Relaxed);
                        None
                    }
                }
            })
            .collect()
            .await;

        self.parse_listing(&Value::Array(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use crate::{config::ExchangeConfig, http::testing::StaticSource};

    const BASE: &str = "http://gemini.test";

    fn adapter() -> GeminiAdapter {
        let mut cfg = ExchangeConfig::new("gemini");
        cfg.base_url = Some(BASE.into());
        GeminiAdapter::new(Venue::from_config(&cfg, LABEL, BASE_URL), 2)
    }

    fn details(symbol: &str, base: &str, quote: &str) -> Value {
        json!({
            "symbol": symbol,
            "base_currency": base,
            "quote_currency": quote,
            "tick_size": 1e-8,
            "status": "open"
        })
    }

    #[tokio::test]
    async fn fetches_details_per_symbol() {
        let http = StaticSource::new()
            .ok(&format!("{BASE}/v1/symbols"), json!(["btcusd", "ethbtc"]))
            .ok(&format!("{BASE}/v1/symbols/details/btcusd"), details("BTCUSD", "BTC", "USD"))
            .ok(&format!("{BASE}/v1/symbols/details/ethbtc"), details("ETHBTC", "ETH", "BTC"));

        let mut symbols = adapter().fetch(&http).await.unwrap();
        symbols.sort_by(|a, b| a.ticker.cmp(&b.ticker));

        assert_eq!(
            symbols,
            vec![
                Symbol::new("BTCUSD", "BTC", "USD").unwrap(),
                Symbol::new("ETHBTC", "ETH", "BTC").unwrap(),
            ]
        );
        assert_eq!(http.call_count(), 3);
    }

    #[tokio::test]
    async fn failed_detail_skips_only_that_symbol() {
        let http = StaticSource::new()
            .ok(&format!("{BASE}/v1/symbols"), json!(["btcusd", "dogeusd", "ethusd"]))
            .ok(&format!("{BASE}/v1/symbols/details/btcusd"), details("BTCUSD", "BTC", "USD"))
            .status(&format!("{BASE}/v1/symbols/details/dogeusd"), 500)
            .ok(&format!("{BASE}/v1/symbols/details/ethusd"), json!({"symbol": "ETHUSD", "base_currency": "ETH"}));

        let symbols = adapter().fetch(&http).await.unwrap();
        assert_eq!(symbols, vec![Symbol::new("BTCUSD", "BTC", "USD").unwrap()]);
    }

    #[tokio::test]
    async fn primary_failure_fails_exchange() {
        let http = StaticSource::new().status(&format!("{BASE}/v1/symbols"), 503);

        let err = adapter().fetch(&http).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 503, .. }));
        assert_eq!(http.call_count(), 1);
    }

    #[tokio::test]
    async fn refetch_issues_new_requests() {
        let http = StaticSource::new()
            .ok(&format!("{BASE}/v1/symbols"), json!(["btcusd"]))
            .ok(&format!("{BASE}/v1/symbols/details/btcusd"), details("BTCUSD", "BTC", "USD"));

        let a = adapter();
        let first = a.fetch(&http).await.unwrap();
        let second = a.fetch(&http).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(http.call_count(), 4);
    }
}
