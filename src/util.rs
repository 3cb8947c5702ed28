/// Utility helpers shared by all exchange adapters.
///
/// This module contains:
/// - Delimited pair splitting ("BASE/QUOTE")
/// - Ticker building for delimiter-based exchanges
/// - Small JSON field accessors
///
/// IMPORTANT:
/// - No exchange-specific business logic should live here.
/// - This module must remain lightweight and deterministic.
///

use serde_json::Value;

/// Split a delimited pair string into (base, quote).
///
/// Examples:
/// - ("ETH/EUR", '/') -> Some(("ETH", "EUR"))
/// - ("BTC_USDT", '_') -> Some(("BTC", "USDT"))
/// - ("BTCUSD", '/')  -> None
///
/// Returns `None` unless both halves are non-empty and the
/// delimiter occurs exactly once.
pub fn split_pair(raw: &str, delimiter: char) -> Option<(String, String)> {
    let mut parts = raw.trim().split(delimiter);

    let base = parts.next()?.trim();
    let quote = parts.next()?.trim();

    if parts.next().is_some() || base.is_empty() || quote.is_empty() {
        return None;
    }

    Some((base.to_string(), quote.to_string()))
}

/// Build a request ticker from an already split pair.
///
/// The halves are joined without delimiter and lowercased:
/// - ("ETH", "EUR") -> "etheur"
pub fn join_ticker(base: &str, quote: &str) -> String {
    format!("{base}{quote}").to_lowercase()
}

/// Non-empty string field of a JSON object.
pub fn str_field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn splits_on_single_delimiter() {
        assert_eq!(
            split_pair("ETH/EUR", '/'),
            Some(("ETH".to_string(), "EUR".to_string()))
        );
        assert_eq!(split_pair("BTCUSD", '/'), None);
        assert_eq!(split_pair("/USD", '/'), None);
        assert_eq!(split_pair("A/B/C", '/'), None);
    }

    #[test]
    fn joins_ticker() {
        assert_eq!(join_ticker("ETH", "EUR"), "etheur");
        assert_eq!(join_ticker("usdc", "USD"), "usdcusd");
    }

    #[test]
    fn str_field_skips_blank_and_non_string() {
        let v = json!({"a": "x", "b": "", "c": 3});
        assert_eq!(str_field(&v, "a"), Some("x"));
        assert_eq!(str_field(&v, "b"), None);
        assert_eq!(str_field(&v, "c"), None);
        assert_eq!(str_field(&v, "d"), None);
    }
}
