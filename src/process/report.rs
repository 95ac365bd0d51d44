use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use csv::ReaderBuilder;
use std::sync::Arc;
use tracing::{debug, instrument};

use crate::error::{CotError, ParseError, SchemaError};
use crate::process::{convert::convert_date_column, table::CotTable};
use crate::schema::{DATE_COLUMN, TRIM_COLUMNS};

/// Load the header-driven report text in `report`, keeping only `allowed`.
///
/// Columns come out in `allowed` order and rows in file order. The padded
/// string columns are trimmed and the report date becomes `Date32`; all
/// other kept columns stay raw `Utf8`.
#[instrument(level = "debug", skip_all, fields(bytes = report.len()))]
pub fn parse_report(report: &[u8], allowed: &[&str]) -> Result<CotTable, CotError> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(report);

    let headers = rdr.headers().map_err(ParseError::from)?.clone();
    // (source index, trim?) per kept column
    let mut layout = Vec::with_capacity(allowed.len());
    for &name in allowed {
        let idx = headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| SchemaError::MissingColumn(name.to_string()))?;
        layout.push((idx, TRIM_COLUMNS.contains(&name)));
    }

    let mut columns: Vec<Vec<String>> = vec![Vec::new(); allowed.len()];
    for result in rdr.records() {
        let record = result.map_err(ParseError::from)?;
        for (col, &(idx, trim)) in columns.iter_mut().zip(&layout) {
            let raw = record.get(idx).unwrap_or_default();
            col.push(if trim { raw.trim() } else { raw }.to_string());
        }
    }

    let fields: Vec<Field> = allowed
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, false))
        .collect();
    let arrays: Vec<ArrayRef> = columns
        .into_iter()
        .map(|values| Arc::new(StringArray::from(values)) as ArrayRef)
        .collect();
    let projected = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)?;
    debug!(
        rows = projected.num_rows(),
        columns = projected.num_columns(),
        "projected report"
    );

    let typed = convert_date_column(&projected, DATE_COLUMN)?;

    Ok(CotTable::from_batch(typed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::table::Cell;
    use crate::process::test_support::{report, COPPER_ROW, GOLD_ROW, HEADER, SILVER_ROW};
    use crate::schema::{CONTRACT_CODE_COLUMN, MARKET_NAME_COLUMN, RELEVANT_COLUMNS};
    use chrono::NaiveDate;

    #[test]
    fn keeps_allow_list_in_declared_order() {
        let text = report(&[GOLD_ROW, SILVER_ROW, COPPER_ROW]);
        let table = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap();

        assert_eq!(table.column_names(), RELEVANT_COLUMNS.to_vec());
        assert_eq!(table.num_rows(), 3);
        assert_eq!(
            table.batch().schema().field_with_name(DATE_COLUMN).unwrap().data_type(),
            &DataType::Date32
        );
    }

    #[test]
    fn trims_padded_strings() {
        let text = report(&[GOLD_ROW, SILVER_ROW]);
        let table = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap();

        assert_eq!(
            table.cell(MARKET_NAME_COLUMN, 0),
            Some(Cell::Text("GOLD - COMMODITY EXCHANGE INC."))
        );
        assert_eq!(table.cell(CONTRACT_CODE_COLUMN, 0), Some(Cell::Text("088691")));
        assert_eq!(table.cell(CONTRACT_CODE_COLUMN, 1), Some(Cell::Text("084691")));
        assert_eq!(table.cell("CFTC_Commodity_Code", 0), Some(Cell::Text("088")));
        assert_eq!(
            table.cell(DATE_COLUMN, 0),
            Some(Cell::Date(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()))
        );
    }

    #[test]
    fn trimming_is_idempotent() {
        let text = report(&[GOLD_ROW]);
        let once = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap();

        let row = GOLD_ROW
            .replace("INC.  \"", "INC.\"")
            .replace("088691  ,", "088691,")
            .replace("088  ,", "088,");
        let text = report(&[row.as_str()]);
        let already_trimmed = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap();
        assert_eq!(once, already_trimmed);
    }

    #[test]
    fn integer_columns_stay_raw() {
        let row = GOLD_ROW.replace(",12345,", ", 12345 ,");
        let text = report(&[row.as_str()]);
        let table = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap();
        assert_eq!(table.cell("Open_Interest_All", 0), Some(Cell::Text(" 12345 ")));
    }

    #[test]
    fn names_first_missing_column() {
        let header = HEADER
            .replace(",Open_Interest_All", ",OI")
            .replace(",Swap__Positions_Short_All", ",SwapShort");
        let text = format!("{}\n", header);
        let err = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap_err();
        assert!(
            matches!(err, CotError::Schema(SchemaError::MissingColumn(ref c)) if c == "Open_Interest_All"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn header_names_are_case_sensitive() {
        let text = format!("{}\n", HEADER.replace("Market_and_Exchange_Names", "MARKET_AND_EXCHANGE_NAMES"));
        let err = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap_err();
        assert!(matches!(err, CotError::Schema(SchemaError::MissingColumn(_))));
    }

    #[test]
    fn bad_date_is_reported_verbatim() {
        let row = GOLD_ROW.replace("2024-01-02", "01/02/2024");
        let text = report(&[row.as_str()]);
        let err = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap_err();
        assert!(
            matches!(err, CotError::Parse(ParseError::InvalidDate(ref raw)) if raw == "01/02/2024"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn ragged_row_fails_whole_parse() {
        let text = report(&[GOLD_ROW, "too,few,fields"]);
        let err = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap_err();
        assert!(matches!(err, CotError::Parse(ParseError::Csv(_))));
    }

    #[test]
    fn header_only_report_is_empty_table() {
        let text = report(&[]);
        let table = parse_report(text.as_bytes(), &RELEVANT_COLUMNS).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.column_names().len(), RELEVANT_COLUMNS.len());
    }

    #[test]
    fn custom_allow_list_skips_designated_columns() {
        let text = report(&[GOLD_ROW]);
        let table = parse_report(text.as_bytes(), &["Open_Interest_All", "CFTC_Market_Code"]).unwrap();
        assert_eq!(table.column_names(), vec!["Open_Interest_All", "CFTC_Market_Code"]);
        // not a designated trim column, so padding survives
        assert_eq!(table.cell("CFTC_Market_Code", 0), Some(Cell::Text("CMX   ")));
    }
}
