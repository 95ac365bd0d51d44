// src/error.rs

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use reqwest::StatusCode;
use thiserror::Error;

/// Failures from the report downloader.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("year must be between 2006 and 2100, got {0}")]
    InvalidInput(i32),

    #[error("CFTC server returned {0}")]
    Network(StatusCode),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid report URL '{url}': {source}")]
    Url {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failures while locating the report inside a ZIP archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("not a valid ZIP archive: {0}")]
    Malformed(String),

    #[error("no .txt report found inside the ZIP archive")]
    ReportMissing,
}

impl From<zip::result::ZipError> for ArchiveError {
    fn from(err: zip::result::ZipError) -> Self {
        ArchiveError::Malformed(err.to_string())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("report header is missing column '{0}'")]
    MissingColumn(String),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid report date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("malformed report text: {0}")]
    Csv(#[from] csv::Error),
}

/// Raised when a table row cannot be turned into a `CotRecord`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("column '{column}' has invalid value '{raw}'")]
    FieldError { column: String, raw: String },
}

/// Top-level error type for the parsing pipeline.
#[derive(Debug, Error)]
pub enum CotError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("unknown ticker '{0}'")]
    UnknownTicker(String),

    #[error("arrow error: {0}")]
    Arrow(#[from] ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] ParquetError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
