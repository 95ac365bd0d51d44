use arrow::{
    array::{Array, ArrayRef, Date32Array, StringArray},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use std::sync::Arc;

use crate::error::{CotError, ParseError};
use crate::process::date_parser::{parse_report_date, to_date32};

/// Replace the `Utf8` column `date_column` with a `Date32` column.
///
/// Every value must be a `YYYY-MM-DD` date; the first that is not aborts the
/// conversion with `ParseError::InvalidDate`. A batch without the column, or
/// where it is already converted, is returned as is.
pub fn convert_date_column(batch: &RecordBatch, date_column: &str) -> Result<RecordBatch, CotError> {
    let schema = batch.schema();
    let Ok(idx) = schema.index_of(date_column) else {
        return Ok(batch.clone());
    };
    let Some(sarr) = batch.column(idx).as_any().downcast_ref::<StringArray>() else {
        return Ok(batch.clone());
    };

    let mut days = Vec::with_capacity(sarr.len());
    for opt in sarr.iter() {
        let raw = opt.unwrap_or_default();
        let date = parse_report_date(raw).ok_or_else(|| ParseError::InvalidDate(raw.to_string()))?;
        days.push(to_date32(date));
    }

    let fields: Vec<Field> = schema
        .fields()
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if i == idx {
                Field::new(f.name(), DataType::Date32, false)
            } else {
                f.as_ref().clone()
            }
        })
        .collect();
    let mut cols = batch.columns().to_vec();
    cols[idx] = Arc::new(Date32Array::from(days)) as ArrayRef;

    RecordBatch::try_new(Arc::new(Schema::new(fields)), cols).map_err(Into::into)
}
