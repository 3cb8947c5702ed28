use serde_json::Value;

use crate::{error::FetchError, schema::Symbol, util};

use super::adapter::{expect_array, keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Bitstamp";
pub const BASE_URL: &str = "https://www.bitstamp.net";

/// Bitstamp REST adapter
///
/// REST:
/// GET /api/v2/trading-pairs-info/
///
/// Notes:
/// - No auth
/// - Pairs come as a single delimited string: name = "BTC/USD"
/// - No separate currency fields, so base/quote are split out
/// - The request ticker is the pair lowercased without "/"
///   ("BTC/USD" -> "btcusd")
pub struct BitstampAdapter {
    venue: Venue,
}

impl BitstampAdapter {
    pub fn new(venue: Venue) -> Self {
        Self { venue }
    }
}

fn parse_pair(item: &Value) -> Option<Symbol> {
    let name = util::str_field(item, "name")?;
    let (base, quote) = util::split_pair(name, '/')?;

    Symbol::new(util::join_ticker(&base, &quote), base, quote)
}

#[async_trait::async_trait]
impl ExchangeAdapter for BitstampAdapter {

    fn name(&self) -> &'static str {
        "bitstamp"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/api/v2/trading-pairs-info/")
    }

    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        let items = expect_array(self.label(), raw, None)?;
        Ok(keep_complete(self.label(), items.iter().map(parse_pair)))
    }
}
