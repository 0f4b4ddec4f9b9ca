//! Configuration handling for vlookup

use std::path::{Path, PathBuf};

/// Default name of the merged output file
pub const DEFAULT_OUTPUT: &str = "Merged.xlsx";

/// Default name of the single sheet in xlsx output
pub const DEFAULT_SHEET_NAME: &str = "Merged";

/// Output container for the merged table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Csv,
    Json,
}

impl OutputFormat {
    /// Infer the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "xlsx" => Ok(OutputFormat::Xlsx),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// How an unmatched left row is padded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaddingPolicy {
    /// Append exactly one empty cell, whatever the right table's width
    #[default]
    Single,
    /// Append as many empty cells as the widest right row contributes
    RightWidth,
}

/// Whether rows with an absent key can match each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyKeyPolicy {
    /// An absent key equals another absent key
    #[default]
    Match,
    /// Rows with an absent key never match
    NeverMatch,
}

/// Options that change what the merge engine produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeOptions {
    pub padding: PaddingPolicy,
    pub empty_keys: EmptyKeyPolicy,
}

/// Configuration for a merge run
#[derive(Debug, Clone)]
pub struct Config {
    /// Input files; the first two are the left and right tables
    pub inputs: Vec<PathBuf>,
    /// Where the merged table is written
    pub output_file: PathBuf,
    /// Explicit output format, otherwise inferred from `output_file`
    pub output_format: Option<OutputFormat>,
    /// Sheet name for xlsx output
    pub sheet_name: String,
    /// Merge engine options
    pub merge: MergeOptions,
    /// Print this many merged rows after writing
    pub preview_rows: Option<usize>,
    /// Only report statistics, do not write the output
    pub stats_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_file: PathBuf::from(DEFAULT_OUTPUT),
            output_format: None,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            merge: MergeOptions::default(),
            preview_rows: None,
            stats_only: false,
        }
    }
}

impl Config {
    /// Create a new Config for a left and a right file
    pub fn new(left: PathBuf, right: PathBuf) -> Self {
        Self {
            inputs: vec![left, right],
            ..Default::default()
        }
    }

    /// Set all input files
    pub fn with_inputs(mut self, inputs: Vec<PathBuf>) -> Self {
        self.inputs = inputs;
        self
    }

    /// Set the output file
    pub fn with_output_file(mut self, path: PathBuf) -> Self {
        self.output_file = path;
        self
    }

    /// Force an output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    /// Set the xlsx sheet name
    pub fn with_sheet_name(mut self, name: String) -> Self {
        self.sheet_name = name;
        self
    }

    /// Set the padding policy for unmatched rows
    pub fn with_padding(mut self, padding: PaddingPolicy) -> Self {
        self.merge.padding = padding;
        self
    }

    /// Set the empty key policy
    pub fn with_empty_keys(mut self, empty_keys: EmptyKeyPolicy) -> Self {
        self.merge.empty_keys = empty_keys;
        self
    }

    /// Preview the first `rows` merged rows
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Enable stats-only mode
    pub fn with_stats_only(mut self, stats_only: bool) -> Self {
        self.stats_only = stats_only;
        self
    }

    /// The format the output will be written in
    pub fn resolved_output_format(&self) -> OutputFormat {
        self.output_format
            .or_else(|| OutputFormat::from_path(&self.output_file))
            .unwrap_or_default()
    }
}
