// src/schema/tickers.rs

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::error::CotError;

/// Friendly ticker symbols → `CFTC_Contract_Market_Code`.
pub static TICKER_TO_CFTC_CODE: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("GC", "088691"), // gold
        ("SI", "084691"), // silver
        ("HG", "085692"), // copper
        ("PL", "076651"), // platinum
    ])
});

/// Look up the contract code for a single ticker, ignoring case.
pub fn code_for_ticker(ticker: &str) -> Option<&'static str> {
    TICKER_TO_CFTC_CODE
        .get(ticker.trim().to_ascii_uppercase().as_str())
        .copied()
}

/// Resolve every ticker, failing on the first one that is not known.
pub fn codes_for_tickers<S: AsRef<str>>(tickers: &[S]) -> Result<Vec<&'static str>, CotError> {
    tickers
        .iter()
        .map(|t| {
            let t = t.as_ref();
            code_for_ticker(t).ok_or_else(|| CotError::UnknownTicker(t.to_string()))
        })
        .collect()
}
