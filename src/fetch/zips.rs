use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

use super::Downloader;
use crate::error::CotError;

/// File name the CFTC uses for a year's archive.
pub fn zip_file_name(year: i32) -> String {
    format!("fut_disagg_txt_{}.zip", year)
}

/// Write already-downloaded archive `bytes` under `dest_dir`.
/// Returns the full path of the saved file.
pub async fn save_zip(year: i32, bytes: &[u8], dest_dir: impl AsRef<Path>) -> Result<PathBuf, CotError> {
    let dest_dir = dest_dir.as_ref();
    fs::create_dir_all(dest_dir).await?;
    let dest_path = dest_dir.join(zip_file_name(year));
    fs::write(&dest_path, bytes).await?;

    info!(path = %dest_path.display(), bytes = bytes.len(), "saved COT archive");
    Ok(dest_path)
}

/// Download the archive for `year` and save it under `dest_dir`.
pub async fn download_zip(
    downloader: &Downloader,
    year: i32,
    dest_dir: impl AsRef<Path>,
) -> Result<PathBuf, CotError> {
    let bytes = downloader.download(year).await?;
    save_zip(year, &bytes, dest_dir).await
}
