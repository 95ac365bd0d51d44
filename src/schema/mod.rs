pub mod columns;
pub mod tickers;

pub use columns::{
    COMMODITY_CODE_COLUMN, CONTRACT_CODE_COLUMN, DATE_COLUMN, MARKET_NAME_COLUMN,
    RELEVANT_COLUMNS, TRIM_COLUMNS,
};
pub use tickers::{code_for_ticker, codes_for_tickers, TICKER_TO_CFTC_CODE};
