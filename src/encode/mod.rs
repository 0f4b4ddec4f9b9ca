//! Encoders turning the merged table into file contents

mod csv;
mod json;
mod xlsx;

use crate::config::{Config, OutputFormat};
use crate::error::EncodeError;
use crate::model::Table;

pub use self::csv::CsvEncoder;
pub use self::json::JsonEncoder;
pub use self::xlsx::XlsxEncoder;

/// Trait for table encoders.
///
/// Implementations accept rows of unequal length.
pub trait Encoder {
    /// Encode a table into file contents
    fn encode(&self, table: &Table) -> Result<Vec<u8>, EncodeError>;
}

/// Factory for creating encoders
pub struct EncoderFactory;

impl EncoderFactory {
    /// Create an encoder with default settings for a format
    pub fn create(format: OutputFormat) -> Box<dyn Encoder> {
        match format {
            OutputFormat::Xlsx => Box::new(XlsxEncoder::new()),
            OutputFormat::Csv => Box::new(CsvEncoder),
            OutputFormat::Json => Box::new(JsonEncoder::new()),
        }
    }

    /// Create the encoder a run is configured for
    pub fn from_config(config: &Config) -> Box<dyn Encoder> {
        match config.resolved_output_format() {
            OutputFormat::Xlsx => Box::new(XlsxEncoder::with_sheet_name(&config.sheet_name)),
            format => Self::create(format),
        }
    }
}
