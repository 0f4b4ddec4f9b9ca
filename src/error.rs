//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the driving surface around the merge engine.
///
/// The merge itself never fails; every variant here comes from reading,
/// decoding, encoding or writing tables.
#[derive(Debug, Error)]
pub enum Error {
    /// Fewer than two tables were supplied
    #[error("two input files are required, got {given}")]
    InsufficientInput { given: usize },

    /// Failed to read an input file
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input could not be decoded into a table
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    /// The merged table could not be encoded
    #[error("failed to encode merged table: {0}")]
    Encode(#[from] EncodeError),

    /// Failed to write the output file
    #[error("failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from turning bytes into a table
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("workbook contains no sheets")]
    NoSheets,

    #[error("unreadable workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Well-formed container holding something that is not a table
    #[error("not a table: {0}")]
    Shape(String),
}

/// Errors from turning a table into bytes
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The table does not fit on one worksheet
    #[error("table of {rows} rows x {columns} columns exceeds the worksheet limit")]
    GridOverflow { rows: usize, columns: usize },
}
