use parquet::{
    arrow::ArrowWriter,
    basic::{Compression, ZstdLevel},
    file::properties::WriterProperties,
};
use std::{fs::File, path::Path};
use tracing::info;

use crate::error::CotError;
use crate::process::table::CotTable;

/// Write `table` to a single-row-group Parquet file at `path`.
pub fn write_parquet<P: AsRef<Path>>(table: &CotTable, path: P) -> Result<(), CotError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let props = WriterProperties::builder()
        .set_compression(Compression::ZSTD(ZstdLevel::try_new(3)?))
        .build();

    let batch = table.batch();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    info!(path = %path.display(), rows = batch.num_rows(), "wrote parquet");
    Ok(())
}
