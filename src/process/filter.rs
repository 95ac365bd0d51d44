use arrow::{array::BooleanArray, compute::filter_record_batch};
use std::collections::HashSet;
use tracing::debug;

use crate::error::{CotError, SchemaError};
use crate::process::table::CotTable;
use crate::schema::CONTRACT_CODE_COLUMN;

/// Keep only the rows whose `CFTC_Contract_Market_Code` is one of `codes`.
///
/// `None` hands the table back untouched. A filter that matches nothing
/// yields an empty table with the same columns.
pub fn filter_codes<S: AsRef<str>>(
    table: CotTable,
    codes: Option<&[S]>,
) -> Result<CotTable, CotError> {
    let Some(codes) = codes else {
        return Ok(table);
    };
    let wanted: HashSet<&str> = codes.iter().map(AsRef::as_ref).collect();

    let column = table
        .text_column(CONTRACT_CODE_COLUMN)
        .ok_or_else(|| SchemaError::MissingColumn(CONTRACT_CODE_COLUMN.to_string()))?;
    let mask: Vec<bool> = column
        .iter()
        .map(|v| v.is_some_and(|code| wanted.contains(code)))
        .collect();

    let batch = filter_record_batch(table.batch(), &BooleanArray::from(mask))?;
    debug!(
        kept = batch.num_rows(),
        total = table.num_rows(),
        codes = wanted.len(),
        "filtered by contract code"
    );
    Ok(CotTable::from_batch(batch))
}
