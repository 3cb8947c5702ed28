use serde_json::Value;

use crate::{error::FetchError, schema::Symbol, util};

use super::adapter::{expect_array, keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Coinbase";
pub const BASE_URL: &str = "https://api.exchange.coinbase.com";

/// Coinbase Exchange REST adapter
///
/// REST:
/// GET /products -> [ { id: "BTC-USD", base_currency, quote_currency, ... } ]
///
/// Notes:
/// - Flat array, currencies provided directly
/// - Requests without a User-Agent are rejected (set on the client)
pub struct CoinbaseAdapter {
    venue: Venue,
}

impl CoinbaseAdapter {
    pub fn new(venue: Venue) -> Self {
        Self { venue }
    }
}

fn parse_product(item: &Value) -> Option<Symbol> {
    Symbol::new(
        util::str_field(item, "id")?,
        util::str_field(item, "base_currency")?,
        util::str_field(item, "quote_currency")?,
    )
}

#[async_trait::async_trait]
impl ExchangeAdapter for CoinbaseAdapter {

    fn name(&self) -> &'static str {
        "coinbase"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/products")
    }

    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        let items = expect_array(self.label(), raw, None)?;
        Ok(keep_complete(self.label(), items.iter().map(parse_product)))
    }
}
