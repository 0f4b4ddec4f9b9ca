//! Decoders turning file contents into tables
//!
//! Only the first sheet of a workbook is read. Decoders never return a
//! partially read table: any malformed input is a [`DecodeError`].

mod csv;
mod excel;
mod json;
mod parquet;

use std::path::Path;

use crate::error::DecodeError;
use crate::model::Table;

pub use self::csv::CsvDecoder;
pub use self::excel::WorkbookDecoder;
pub use self::json::JsonDecoder;
pub use self::parquet::ParquetDecoder;

/// Trait for decoding tabular data from bytes
pub trait Decoder: Send + Sync {
    /// Decode file contents into a Table
    fn decode(&self, bytes: &[u8]) -> Result<Table, DecodeError>;

    /// Check if this decoder can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;

    /// Short name used in log events
    fn name(&self) -> &'static str;
}

/// Registry choosing a decoder by file extension or content
pub struct DecoderRegistry {
    decoders: Vec<Box<dyn Decoder>>,
}

impl Default for DecoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderRegistry {
    /// Create a registry with all supported decoders
    pub fn new() -> Self {
        Self {
            decoders: vec![
                Box::new(WorkbookDecoder),
                Box::new(CsvDecoder),
                Box::new(ParquetDecoder),
                Box::new(JsonDecoder),
            ],
        }
    }

    /// Get a decoder by extension
    pub fn by_extension(&self, ext: &str) -> Option<&dyn Decoder> {
        let ext = ext.to_lowercase();
        self.decoders
            .iter()
            .find(|d| d.supports_extension(&ext))
            .map(|d| d.as_ref())
    }

    /// Get a decoder for a file, preferring its extension over its content
    pub fn decoder_for(&self, path: &Path, bytes: &[u8]) -> Result<&dyn Decoder, DecodeError> {
        let ext = path.extension().and_then(|e| e.to_str());
        if let Some(decoder) = ext.and_then(|e| self.by_extension(e)) {
            return Ok(decoder);
        }

        detect_format(bytes)
            .and_then(|format| self.by_extension(format))
            .ok_or_else(|| DecodeError::UnsupportedFormat(ext.unwrap_or("unknown").to_string()))
    }

    /// Decode file contents using the appropriate decoder
    pub fn decode(&self, path: &Path, bytes: &[u8]) -> Result<Table, DecodeError> {
        self.decoder_for(path, bytes)?.decode(bytes)
    }
}

/// Detect the container format from leading bytes
pub fn detect_format(bytes: &[u8]) -> Option<&'static str> {
    if bytes.len() < 4 {
        return (!bytes.is_empty()).then_some("csv");
    }

    match &bytes[0..4] {
        b"PAR1" => Some("parquet"),
        // ZIP container: xlsx, xlsm, xlsb, ods
        b"PK\x03\x04" => Some("xlsx"),
        // OLE compound document: legacy xls
        b"\xD0\xCF\x11\xE0" => Some("xls"),
        _ => {
            let text = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
            match text.iter().find(|b| !b.is_ascii_whitespace()) {
                Some(b'[') => Some("json"),
                _ => Some("csv"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert_eq!(detect_format(b"PAR1rest"), Some("parquet"));
        assert_eq!(detect_format(b"PK\x03\x04rest"), Some("xlsx"));
        assert_eq!(detect_format(b"\xD0\xCF\x11\xE0rest"), Some("xls"));
        assert_eq!(detect_format(b"  [[1, 2]]"), Some("json"));
        assert_eq!(detect_format(b"a,b\n1,2\n"), Some("csv"));
        assert_eq!(detect_format(b""), None);
    }

    #[test]
    fn test_extension_wins_over_content() {
        let registry = DecoderRegistry::new();
        let decoder = registry
            .decoder_for(Path::new("data.CSV"), b"[1]")
            .expect("csv decoder");
        assert_eq!(decoder.name(), "csv");

        let decoder = registry
            .decoder_for(Path::new("upload.bin"), b"[[1]]")
            .expect("json decoder");
        assert_eq!(decoder.name(), "json");
    }

    #[test]
    fn test_unknown_empty_input_is_unsupported() {
        let registry = DecoderRegistry::new();
        let err = registry.decode(Path::new("blob"), b"").unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedFormat(_)));
    }
}
