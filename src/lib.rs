//! Fetch and parse CFTC Commitment of Traders disaggregated futures-only
//! reports into typed records.
//!
//! ```no_run
//! # async fn run() -> Result<(), cotscraper::error::CotError> {
//! use cotscraper::{fetch::Downloader, parse_cot_zip, records_from_table, schema};
//!
//! let data = Downloader::new()?.download(2024).await?;
//! let gold = schema::codes_for_tickers(&["GC"])?;
//! let table = parse_cot_zip(&data, Some(gold.as_slice()))?;
//! let records = records_from_table(&table)?;
//! # Ok(()) }
//! ```

pub mod error;
pub mod fetch;
pub mod models;
pub mod process;
pub mod schema;

pub use error::CotError;
pub use fetch::Downloader;
pub use models::{records_from_table, CotRecord};
pub use process::{load_cot_zip, parse_cot_zip, CotTable};
