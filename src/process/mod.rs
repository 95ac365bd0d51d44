// src/process/mod.rs
pub mod convert;
pub mod date_parser;
pub mod extract;
pub mod filter;
pub mod report;
pub mod table;
pub mod write;

#[cfg(test)]
pub(crate) mod test_support;

pub use extract::extract_report;
pub use filter::filter_codes;
pub use report::parse_report;
pub use table::{Cell, CotTable};
pub use write::write_parquet;

use std::{fs, path::Path};
use tracing::{info, instrument};

use crate::error::CotError;
use crate::schema::RELEVANT_COLUMNS;

/// Parse a yearly disaggregated futures-only ZIP held in memory.
///
/// Extracts the `.txt` report, keeps `RELEVANT_COLUMNS`, trims the padded
/// string columns, types the report date and, when `codes` is given, keeps
/// only rows for those contract market codes.
#[instrument(level = "info", skip_all, fields(bytes = data.len()))]
pub fn parse_cot_zip<S: AsRef<str>>(
    data: &[u8],
    codes: Option<&[S]>,
) -> Result<CotTable, CotError> {
    let report = extract_report(data)?;
    let table = parse_report(&report, &RELEVANT_COLUMNS)?;
    let table = filter_codes(table, codes)?;
    info!(rows = table.num_rows(), "parsed COT report");
    Ok(table)
}

/// Same as [`parse_cot_zip`], reading the archive from disk.
pub fn load_cot_zip<P: AsRef<Path>, S: AsRef<str>>(
    zip_path: P,
    codes: Option<&[S]>,
) -> Result<CotTable, CotError> {
    let data = fs::read(zip_path.as_ref())?;
    parse_cot_zip(&data, codes)
}
