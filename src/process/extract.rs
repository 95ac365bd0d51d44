use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// Suffix of the report entry inside a yearly archive.
pub const REPORT_SUFFIX: &str = ".txt";

/// Return the bytes of the first `.txt` entry in the ZIP held in `data`.
pub fn extract_report(data: &[u8]) -> Result<Vec<u8>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        let name = entry.name().to_string();
        if !entry.is_file() || !name.to_lowercase().ends_with(REPORT_SUFFIX) {
            continue;
        }

        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buf)
            .map_err(|e| ArchiveError::Malformed(format!("reading {}: {}", name, e)))?;
        debug!(entry = %name, bytes = buf.len(), "extracted report");
        return Ok(buf);
    }

    Err(ArchiveError::ReportMissing)
}
