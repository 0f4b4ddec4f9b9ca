//! vlookup - VLOOKUP-style left join for tabular data
//!
//! Joins the rows of a left table with the first right-table row sharing
//! their key (the first cell). Inputs can be Excel/ODS workbooks (first sheet
//! only), CSV, Parquet or JSON; the merged table is written as xlsx, CSV or
//! JSON.

pub mod config;
pub mod decode;
pub mod encode;
pub mod error;
pub mod merge;
pub mod model;
mod observability;
pub mod pipeline;
pub mod preview;

pub use config::{Config, EmptyKeyPolicy, MergeOptions, OutputFormat, PaddingPolicy};
pub use error::{DecodeError, EncodeError, Error, Result};
pub use merge::{merge, MergeEngine, MergeOutcome, MergeStats};
pub use model::{CellValue, Row, Table};
