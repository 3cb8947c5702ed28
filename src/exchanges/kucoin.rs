use serde_json::Value;

use crate::{error::FetchError, schema::Symbol, util};

use super::adapter::{expect_array, keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Kucoin";
pub const BASE_URL: &str = "https://api.kucoin.com";

/// KuCoin success code; anything else is an in-band error.
const SUCCESS_CODE: &str = "200000";

/// KuCoin REST adapter
///
/// REST:
/// GET /api/v2/symbols -> { code: "200000", data: [ { symbol, baseCurrency, quoteCurrency } ] }
///
/// Symbols are BASE-QUOTE ("BTC-USDT") and used as-is.
pub struct KucoinAdapter {
    venue: Venue,
}

impl KucoinAdapter {
    pub fn new(venue: Venue) -> Self {
        Self { venue }
    }
}

fn parse_symbol(item: &Value) -> Option<Symbol> {
    Symbol::new(
        util::str_field(item, "symbol")?,
        util::str_field(item, "baseCurrency")?,
        util::str_field(item, "quoteCurrency")?,
    )
}

#[async_trait::async_trait]
impl ExchangeAdapter for KucoinAdapter {

    fn name(&self) -> &'static str {
        "kucoin"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/api/v2/symbols")
    }

    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        match raw.get("code").and_then(Value::as_str) {
            Some(SUCCESS_CODE) => {}
            Some(code) => {
                let msg = util::str_field(raw, "msg").unwrap_or("no message");
                return Err(FetchError::malformed(self.label(), format!("code {code}: {msg}")));
            }
            None => return Err(FetchError::malformed(self.label(), "missing `code`")),
        }

        let items = expect_array(self.label(), raw, Some("data"))?;
        Ok(keep_complete(self.label(), items.iter().map(parse_symbol)))
    }
}
