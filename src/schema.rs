// ------------------------------------------------------------
// Canonical symbol record
// ------------------------------------------------------------
//
// Every exchange adapter translates its raw listing into a
// sequence of these records. The aggregator never looks at an
// exchange's raw schema, only at this shape.
//
// IMPORTANT:
// - Currencies keep the casing/form the exchange returns.
//   "XBT" and "BTC" are different keys.
// - The ticker is opaque downstream and never parsed again.
//
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    /// Exchange-specific identifier used for quote/trade requests
    /// Example: "btcusd", "BTC-USD", "XXBTZUSD"
    pub ticker: String,

    /// Base currency as the exchange spells it
    pub base_currency: String,

    /// Quote currency as the exchange spells it
    pub quote_currency: String,
}

impl Symbol {
    /// Builds a record, or `None` if any field is empty.
    ///
    /// Adapters must drop an instrument rather than yield a
    /// partial record, so every construction goes through here.
    pub fn new(
        ticker: impl Into<String>,
        base_currency: impl Into<String>,
        quote_currency: impl Into<String>,
    ) -> Option<Self> {
        let ticker = ticker.into().trim().to_string();
        let base_currency = base_currency.into().trim().to_string();
        let quote_currency = quote_currency.into().trim().to_string();

        if ticker.is_empty() || base_currency.is_empty() || quote_currency.is_empty() {
            return None;
        }

        Some(Self {
            ticker,
            base_currency,
            quote_currency,
        })
    }
}
