// src/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ValidationError;
use crate::process::{Cell, CotTable};

/// One row of disaggregated futures-only COT data.
///
/// Field names follow a friendly convention rather than the raw CFTC
/// column names; see [`FIELD_MAPPINGS`] for the correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CotRecord {
    pub date: NaiveDate,
    pub market_name: String,
    pub cftc_contract_market_code: String,
    pub open_interest: i64,
    pub managed_money_long: i64,
    pub managed_money_short: i64,
    pub managed_money_spread: i64,
    pub producer_long: i64,
    pub producer_short: i64,
    pub swap_long: i64,
    pub swap_short: i64,
    pub other_reportable_long: i64,
    pub other_reportable_short: i64,
}

/// How a raw cell becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    Date,
    Text,
    Int,
}

/// Target field of a [`CotRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CotField {
    Date,
    MarketName,
    ContractMarketCode,
    OpenInterest,
    ManagedMoneyLong,
    ManagedMoneyShort,
    ManagedMoneySpread,
    ProducerLong,
    ProducerShort,
    SwapLong,
    SwapShort,
    OtherReportableLong,
    OtherReportableShort,
}

/// A source column and the record field it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pub column: &'static str,
    pub field: CotField,
}

const fn map(column: &'static str, field: CotField) -> FieldMapping {
    FieldMapping { column, field }
}

const FIELD_COUNT: usize = 13;

/// Every `CotRecord` field, in declaration order, with its source column.
pub const FIELD_MAPPINGS: [FieldMapping; FIELD_COUNT] = [
    map("As_of_Date_Form_YYYY-MM-DD", CotField::Date),
    map("Market_and_Exchange_Names", CotField::MarketName),
    map("CFTC_Contract_Market_Code", CotField::ContractMarketCode),
    map("Open_Interest_All", CotField::OpenInterest),
    map("M_Money_Positions_Long_All", CotField::ManagedMoneyLong),
    map("M_Money_Positions_Short_All", CotField::ManagedMoneyShort),
    map("M_Money_Positions_Spread_All", CotField::ManagedMoneySpread),
    map("Prod_Merc_Positions_Long_All", CotField::ProducerLong),
    map("Prod_Merc_Positions_Short_All", CotField::ProducerShort),
    map("Swap_Positions_Long_All", CotField::SwapLong),
    map("Swap__Positions_Short_All", CotField::SwapShort),
    map("Other_Rept_Positions_Long_All", CotField::OtherReportableLong),
    map("Other_Rept_Positions_Short_All", CotField::OtherReportableShort),
];

/// A coerced cell, before it lands in its record field.
#[derive(Debug)]
enum Value {
    Date(NaiveDate),
    Text(String),
    Int(i64),
}

impl CotField {
    pub const fn name(self) -> &'static str {
        match self {
            CotField::Date => "date",
            CotField::MarketName => "market_name",
            CotField::ContractMarketCode => "cftc_contract_market_code",
            CotField::OpenInterest => "open_interest",
            CotField::ManagedMoneyLong => "managed_money_long",
            CotField::ManagedMoneyShort => "managed_money_short",
            CotField::ManagedMoneySpread => "managed_money_spread",
            CotField::ProducerLong => "producer_long",
            CotField::ProducerShort => "producer_short",
            CotField::SwapLong => "swap_long",
            CotField::SwapShort => "swap_short",
            CotField::OtherReportableLong => "other_reportable_long",
            CotField::OtherReportableShort => "other_reportable_short",
        }
    }

    pub const fn coercion(self) -> Coercion {
        match self {
            CotField::Date => Coercion::Date,
            CotField::MarketName | CotField::ContractMarketCode => Coercion::Text,
            _ => Coercion::Int,
        }
    }

    fn column(self) -> &'static str {
        FIELD_MAPPINGS
            .iter()
            .find(|m| m.field == self)
            .map_or(self.name(), |m| m.column)
    }
}

impl Coercion {
    fn apply(self, column: &str, cell: Cell<'_>) -> Result<Value, ValidationError> {
        match self {
            Coercion::Date => coerce_date(column, cell).map(Value::Date),
            Coercion::Text => coerce_text(column, cell).map(Value::Text),
            Coercion::Int => coerce_int(column, cell).map(Value::Int),
        }
    }
}

fn field_error(column: &str, raw: impl Into<String>) -> ValidationError {
    ValidationError::FieldError {
        column: column.to_string(),
        raw: raw.into(),
    }
}

fn coerce_date(column: &str, cell: Cell<'_>) -> Result<NaiveDate, ValidationError> {
    match cell {
        Cell::Date(d) => Ok(d),
        Cell::Text(s) => {
            crate::process::date_parser::parse_report_date(s).ok_or_else(|| field_error(column, s))
        }
        Cell::Null => Err(field_error(column, "")),
    }
}

fn coerce_text(column: &str, cell: Cell<'_>) -> Result<String, ValidationError> {
    match cell {
        Cell::Text(s) => Ok(s.to_string()),
        Cell::Date(d) => Ok(d.format("%Y-%m-%d").to_string()),
        Cell::Null => Err(field_error(column, "")),
    }
}

/// Any `i64` is accepted, negatives included; surrounding whitespace is ignored.
fn coerce_int(column: &str, cell: Cell<'_>) -> Result<i64, ValidationError> {
    match cell {
        Cell::Text(s) => s.trim().parse().map_err(|_| field_error(column, s)),
        Cell::Date(d) => Err(field_error(column, d.to_string())),
        Cell::Null => Err(field_error(column, "")),
    }
}

/// Coerced values of one row, indexed by `CotField`.
struct RowValues([Option<Value>; FIELD_COUNT]);

impl RowValues {
    fn take(&mut self, field: CotField) -> Result<Value, ValidationError> {
        self.0[field as usize]
            .take()
            .ok_or_else(|| field_error(field.column(), ""))
    }

    fn date(&mut self, field: CotField) -> Result<NaiveDate, ValidationError> {
        match self.take(field)? {
            Value::Date(d) => Ok(d),
            other => Err(field_error(field.column(), format!("{other:?}"))),
        }
    }

    fn text(&mut self, field: CotField) -> Result<String, ValidationError> {
        match self.take(field)? {
            Value::Text(s) => Ok(s),
            other => Err(field_error(field.column(), format!("{other:?}"))),
        }
    }

    fn int(&mut self, field: CotField) -> Result<i64, ValidationError> {
        match self.take(field)? {
            Value::Int(n) => Ok(n),
            other => Err(field_error(field.column(), format!("{other:?}"))),
        }
    }
}

impl CotRecord {
    /// Build the record for `row` of `table`, stopping at the first column
    /// that is absent or fails coercion.
    pub fn from_row(table: &CotTable, row: usize) -> Result<Self, ValidationError> {
        let mut values = RowValues(Default::default());
        for mapping in FIELD_MAPPINGS.iter() {
            let cell = table
                .cell(mapping.column, row)
                .ok_or_else(|| field_error(mapping.column, ""))?;
            let value = mapping.field.coercion().apply(mapping.column, cell)?;
            values.0[mapping.field as usize] = Some(value);
        }

        Ok(CotRecord {
            date: values.date(CotField::Date)?,
            market_name: values.text(CotField::MarketName)?,
            cftc_contract_market_code: values.text(CotField::ContractMarketCode)?,
            open_interest: values.int(CotField::OpenInterest)?,
            managed_money_long: values.int(CotField::ManagedMoneyLong)?,
            managed_money_short: values.int(CotField::ManagedMoneyShort)?,
            managed_money_spread: values.int(CotField::ManagedMoneySpread)?,
            producer_long: values.int(CotField::ProducerLong)?,
            producer_short: values.int(CotField::ProducerShort)?,
            swap_long: values.int(CotField::SwapLong)?,
            swap_short: values.int(CotField::SwapShort)?,
            other_reportable_long: values.int(CotField::OtherReportableLong)?,
            other_reportable_short: values.int(CotField::OtherReportableShort)?,
        })
    }
}

/// Convert every row of `table` into a `CotRecord`, in table order.
#[instrument(level = "debug", skip_all, fields(rows = table.num_rows()))]
pub fn records_from_table(table: &CotTable) -> Result<Vec<CotRecord>, ValidationError> {
    let records = (0..table.num_rows())
        .map(|row| CotRecord::from_row(table, row))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(records = records.len(), "mapped COT records");
    Ok(records)
}
