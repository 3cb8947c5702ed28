use serde_json::Value;

use crate::{error::FetchError, schema::Symbol, util};

use super::adapter::{expect_array, keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Binance.US";
pub const BASE_URL: &str = "https://api.binance.us";

/// Binance.US REST adapter
///
/// REST:
/// GET /api/v3/exchangeInfo -> { symbols: [ { symbol: "BTCUSDT", baseAsset, quoteAsset, status } ] }
///
/// Notes:
/// - Symbols carry no separator, so the asset fields are required
/// - `status` is ignored; halted pairs are still listed
pub struct BinanceUsAdapter {
    venue: Venue,
}

impl BinanceUsAdapter {
    pub fn new(venue: Venue) -> Self {
        Self { venue }
    }
}

fn parse_symbol(item: &Value) -> Option<Symbol> {
    Symbol::new(
        util::str_field(item, "symbol")?,
        util::str_field(item, "baseAsset")?,
        util::str_field(item, "quoteAsset")?,
    )
}

#[async_trait::async_trait]
impl ExchangeAdapter for BinanceUsAdapter {

    fn name(&self) -> &'static str {
        "binanceus"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/api/v3/exchangeInfo")
    }

    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        let items = expect_array(self.label(), raw, Some("symbols"))?;
        Ok(keep_complete(self.label(), items.iter().map(parse_symbol)))
    }
}
