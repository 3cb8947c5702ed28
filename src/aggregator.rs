//! Symbol aggregator.
//!
//! Folds canonical records from any number of exchanges into one
//! nested lookup:
//!
//! ```text
//! { base_currency: { quote_currency: { exchange_label: ticker } } }
//! ```
//!
//! The directory is an explicit accumulator. It is created empty,
//! merged into once per exchange, written once and dropped.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{error::DirectoryError, schema::Symbol};

/// exchange label -> ticker
pub type ExchangeTickers = BTreeMap<String, String>;

/// base -> quote -> exchange label -> ticker
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Directory {
    entries: BTreeMap<String, BTreeMap<String, ExchangeTickers>>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one exchange's records.
    ///
    /// Sets `[base][quote][exchange] = ticker` for every record,
    /// creating intermediate maps as needed. An existing value for
    /// the exact same triple is overwritten. Keys written by other
    /// exchanges are never read or removed, so merges of distinct
    /// exchanges commute.
    pub fn merge(&mut self, records: &[Symbol], exchange: &str) -> &mut Self {
        for s in records {
            self.entries
                .entry(s.base_currency.clone())
                .or_default()
                .entry(s.quote_currency.clone())
                .or_default()
                .insert(exchange.to_string(), s.ticker.clone());
        }
        self
    }

    /// Tickers of every exchange listing `base`/`quote`.
    pub fn pair(&self, base: &str, quote: &str) -> Option<&ExchangeTickers> {
        self.entries.get(base)?.get(quote)
    }

    pub fn ticker(&self, base: &str, quote: &str, exchange: &str) -> Option<&str> {
        self.pair(base, quote)?.get(exchange).map(String::as_str)
    }

    /// Number of distinct (base, quote) pairs.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_value(&self) -> Result<Value, DirectoryError> {
        serde_json::to_value(self).map_err(DirectoryError::Serialize)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, DirectoryError> {
        let out = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        out.map_err(DirectoryError::Serialize)
    }

    pub fn from_json(doc: &str) -> Result<Self, DirectoryError> {
        serde_json::from_str(doc).map_err(DirectoryError::Parse)
    }

    /// Read a previously written directory document.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let doc = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&doc)
    }

    /// Serialize and replace the file at `path`.
    ///
    /// The document is fully rendered before anything touches the
    /// disk, then written to a sibling temp file and renamed over
    /// the target. A failure leaves the previous file untouched.
    pub fn write_to(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), DirectoryError> {
        let path = path.as_ref();
        let doc = self.to_json(pretty)?;
        let tmp = temp_path(path);

        if let Err(source) = fs::write(&tmp, doc) {
            let _ = fs::remove_file(&tmp);
            return Err(DirectoryError::Io { path: tmp, source });
        }

        fs::rename(&tmp, path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            DirectoryError::Io {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sym(ticker: &str, base: &str, quote: &str) -> Symbol {
        Symbol::new(ticker, base, quote).unwrap()
    }

    #[test]
    fn merges_two_exchanges_into_one_cell() {
        let mut dir = Directory::new();
        dir.merge(&[sym("btcusd", "BTC", "USD")], "ExchA")
            .merge(&[sym("XBTUSD", "BTC", "USD")], "ExchB");

        assert_eq!(
            dir.to_value().unwrap(),
            json!({ "BTC": { "USD": { "ExchA": "btcusd", "ExchB": "XBTUSD" } } })
        );
        assert_eq!(dir.ticker("BTC", "USD", "ExchB"), Some("XBTUSD"));
        assert_eq!(dir.len(), 1);
    }

    #[test]
    fn merge_order_across_exchanges_commutes() {
        let a = vec![sym("btcusd", "BTC", "USD"), sym("etheur", "ETH", "EUR")];
        let b = vec![sym("BTC-USD", "BTC", "USD"), sym("SOL-USDT", "SOL", "USDT")];

        let mut ab = Directory::new();
        ab.merge(&a, "A").merge(&b, "B");

        let mut ba = Directory::new();
        ba.merge(&b, "B").merge(&a, "A");

        assert_eq!(ab, ba);
        assert_eq!(ab.len(), 3);
    }

    #[test]
    fn last_write_wins_on_same_triple() {
        let mut dir = Directory::new();
        dir.merge(&[sym("old", "BTC", "USD")], "A");
        dir.merge(&[sym("new", "BTC", "USD")], "A");

        assert_eq!(dir.ticker("BTC", "USD", "A"), Some("new"));
        assert_eq!(dir.pair("BTC", "USD").unwrap().len(), 1);
    }

    #[test]
    fn duplicate_within_one_batch_keeps_last() {
        let mut dir = Directory::new();
        dir.merge(&[sym("first", "ETH", "BTC"), sym("second", "ETH", "BTC")], "A");

        assert_eq!(dir.ticker("ETH", "BTC", "A"), Some("second"));
    }

    #[test]
    fn currencies_are_not_unified() {
        let mut dir = Directory::new();
        dir.merge(&[sym("XXBTZUSD", "XBT", "USD")], "Kraken")
            .merge(&[sym("BTC-USD", "BTC", "USD")], "Coinbase");

        assert!(dir.pair("XBT", "USD").is_some());
        assert!(dir.pair("BTC", "USD").is_some());
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn empty_directory_serializes_to_empty_object() {
        let dir = Directory::new();
        assert!(dir.is_empty());
        assert_eq!(dir.to_json(false).unwrap(), "{}");
    }

    #[test]
    fn base_without_quotes_counts_as_empty() {
        let dir = Directory::from_json(r#"{"BTC": {}}"#).unwrap();
        assert_eq!(dir.len(), 0);
        assert!(dir.is_empty());
    }

    #[test]
    fn serialize_then_parse_round_trips() {
        let mut dir = Directory::new();
        dir.merge(&[sym("btcusd", "BTC", "USD"), sym("ltcbtc", "LTC", "BTC")], "Bitstamp")
            .merge(&[sym("BTC_USDT", "BTC", "USDT")], "Crypto.com");

        let parsed = Directory::from_json(&dir.to_json(true).unwrap()).unwrap();
        assert_eq!(parsed, dir);
    }

    #[test]
    fn write_to_replaces_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("symbol_database.json");
        std::fs::write(&path, "stale").unwrap();

        let mut dir = Directory::new();
        dir.merge(&[sym("ETHUSD", "ETH", "USD")], "Gemini");
        dir.write_to(&path, false).unwrap();

        assert_eq!(Directory::load(&path).unwrap(), dir);
        assert!(!tmp.path().join("symbol_database.json.tmp").exists());
    }

    #[test]
    fn write_to_missing_dir_fails_without_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing").join("out.json");

        let err = Directory::new().write_to(&path, true).unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn load_rejects_non_directory_document() {
        assert!(matches!(
            Directory::from_json(r#"{"BTC": {"USD": 5}}"#),
            Err(DirectoryError::Parse(_))
        ));
    }
}
