use arrow::{
    array::{Array, Date32Array, StringArray},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;

use crate::process::date_parser::from_date32;

/// A parsed report: one Arrow batch holding the projected columns.
///
/// The date column is `Date32`, everything else `Utf8`. Cloning is cheap
/// because the underlying buffers are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct CotTable {
    batch: RecordBatch,
}

/// A single value read back out of a `CotTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Date(NaiveDate),
    Text(&'a str),
    Null,
}

impl CotTable {
    pub fn from_batch(batch: RecordBatch) -> Self {
        Self { batch }
    }

    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    pub fn into_batch(self) -> RecordBatch {
        self.batch
    }

    pub fn num_rows(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn is_empty(&self) -> bool {
        self.batch.num_rows() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.batch
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect()
    }

    pub fn text_column(&self, name: &str) -> Option<&StringArray> {
        self.batch
            .column_by_name(name)?
            .as_any()
            .downcast_ref::<StringArray>()
    }

    pub fn date_column(&self, name: &str) -> Option<&Date32Array> {
        self.batch
            .column_by_name(name)?
            .as_any()
            .downcast_ref::<Date32Array>()
    }

    /// Value at (`column`, `row`); `None` when either is out of range or the
    /// column has a type the parser never produces.
    pub fn cell(&self, column: &str, row: usize) -> Option<Cell<'_>> {
        if row >= self.num_rows() {
            return None;
        }
        if let Some(dates) = self.date_column(column) {
            if dates.is_null(row) {
                return Some(Cell::Null);
            }
            return from_date32(dates.value(row)).map(Cell::Date);
        }
        let text = self.text_column(column)?;
        if text.is_null(row) {
            return Some(Cell::Null);
        }
        Some(Cell::Text(text.value(row)))
    }
}
