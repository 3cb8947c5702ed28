use serde_json::Value;

use crate::{error::FetchError, schema::Symbol, util};

use super::adapter::{expect_array, keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Crypto.com";
pub const BASE_URL: &str = "https://api.crypto.com";

/// Crypto.com Exchange REST adapter
///
/// REST:
/// GET /v2/public/get-instruments
///
/// Response:
/// { "code": 0, "result": { "instruments": [ { instrument_name, base_currency, quote_currency } ] } }
///
/// The instrument list is nested one level under `result`.
pub struct CryptoComAdapter {
    venue: Venue,
}

impl CryptoComAdapter {
    pub fn new(venue: Venue) -> Self {
        Self { venue }
    }
}

fn parse_instrument(item: &Value) -> Option<Symbol> {
    Symbol::new(
        util::str_field(item, "instrument_name")?,
        util::str_field(item, "base_currency")?,
        util::str_field(item, "quote_currency")?,
    )
}

#[async_trait::async_trait]
impl ExchangeAdapter for CryptoComAdapter {

    fn name(&self) -> &'static str {
        "cryptocom"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/v2/public/get-instruments")
    }

    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        if let Some(code) = raw.get("code").and_then(Value::as_i64) {
            if code != 0 {
                return Err(FetchError::malformed(self.label(), format!("error code {code}")));
            }
        }

        let result = raw
            .get("result")
            .ok_or_else(|| FetchError::malformed(self.label(), "missing `result`"))?;

        let items = expect_array(self.label(), result, Some("instruments"))?;
        Ok(keep_complete(self.label(), items.iter().map(parse_instrument)))
    }
}
