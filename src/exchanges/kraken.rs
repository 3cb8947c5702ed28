use serde_json::Value;

use crate::{error::FetchError, schema::Symbol, util};

use super::adapter::{keep_complete, ExchangeAdapter, Venue};

pub const LABEL: &str = "Kraken";
pub const BASE_URL: &str = "https://api.kraken.com";

/// Kraken REST adapter (Spot)
///
/// REST:
/// GET /0/public/AssetPairs
///
/// Response:
/// { "error": [], "result": { "XXBTZUSD": { altname, wsname: "XBT/USD", base: "XXBT", quote: "ZUSD" } } }
///
/// Notes:
/// - Instruments are keyed by name in a map, not listed
/// - The map key is the ticker
/// - Currencies come from `wsname` when present ("XBT/USD"),
///   otherwise from the raw `base` / `quote` asset codes
/// - Kraken reports failures in-band through `error`
pub struct KrakenAdapter {
    venue: Venue,
}

impl KrakenAdapter {
    pub fn new(venue: Venue) -> Self {
        Self { venue }
    }
}

fn parse_asset_pair(key: &str, item: &Value) -> Option<Symbol> {
    let (base, quote) = match util::str_field(item, "wsname").and_then(|w| util::split_pair(w, '/')) {
        Some(pair) => pair,
        None => (
            util::str_field(item, "base")?.to_string(),
            util::str_field(item, "quote")?.to_string(),
        ),
    };

    Symbol::new(key, base, quote)
}

#[async_trait::async_trait]
impl ExchangeAdapter for KrakenAdapter {

    fn name(&self) -> &'static str {
        "kraken"
    }

    fn label(&self) -> &str {
        &self.venue.label
    }

    fn listing_url(&self) -> String {
        self.venue.url("/0/public/AssetPairs")
    }

    fn parse_listing(&self, raw: &Value) -> Result<Vec<Symbol>, FetchError> {
        if let Some(errors) = raw.get("error").and_then(Value::as_array) {
            if !errors.is_empty() {
                let reason = errors
                    .iter()
                    .map(|e| e.as_str().map(str::to_string).unwrap_or_else(|| e.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Err(FetchError::malformed(self.label(), reason));
            }
        }

        let pairs = raw
            .get("result")
            .and_then(Value::as_object)
            .ok_or_else(|| FetchError::malformed(self.label(), "missing `result` map"))?;

        Ok(keep_complete(
            self.label(),
            pairs.iter().map(|(key, item)| parse_asset_pair(key, item)),
        ))
    }
}
