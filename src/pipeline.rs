//! Read two files, merge them, write the result

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::decode::DecoderRegistry;
use crate::encode::EncoderFactory;
use crate::error::{Error, Result};
use crate::merge::{MergeEngine, MergeOutcome};
use crate::model::Table;
use crate::observability::{log_debug, log_info, log_warn};

/// What a run produced
#[derive(Debug)]
pub struct MergeReport {
    pub left_file: PathBuf,
    pub right_file: PathBuf,
    /// Where the merged table was written; `None` in stats-only mode
    pub output_file: Option<PathBuf>,
    pub outcome: MergeOutcome,
}

/// Pick the left and right input from the configured files.
///
/// Anything after the first two files is ignored.
pub fn select_inputs(inputs: &[PathBuf]) -> Result<(&Path, &Path)> {
    match inputs {
        [left, right, rest @ ..] => {
            if !rest.is_empty() {
                log_warn!(
                    component = "pipeline",
                    event = "extra_inputs_ignored",
                    ignored = rest.len(),
                );
            }
            Ok((left.as_path(), right.as_path()))
        }
        _ => Err(Error::InsufficientInput {
            given: inputs.len(),
        }),
    }
}

/// Read a whole file and decode its first sheet
pub fn load_table(registry: &DecoderRegistry, path: &Path) -> Result<Table> {
    let bytes = fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = registry
        .decoder_for(path, &bytes)
        .map_err(|source| decode_error(path, source))?;
    let table = decoder
        .decode(&bytes)
        .map_err(|source| decode_error(path, source))?;

    log_debug!(
        component = "pipeline",
        event = "table_decoded",
        path = %path.display(),
        decoder = decoder.name(),
        rows = table.row_count(),
    );
    Ok(table)
}

fn decode_error(path: &Path, source: crate::error::DecodeError) -> Error {
    Error::Decode {
        path: path.to_path_buf(),
        source,
    }
}

/// Decode both inputs in parallel.
///
/// Both tables are complete before this returns. If both fail, the left
/// file's error is reported.
pub fn load_pair(left: &Path, right: &Path) -> Result<(Table, Table)> {
    let registry = DecoderRegistry::new();
    let (left_table, right_table) = rayon::join(
        || load_table(&registry, left),
        || load_table(&registry, right),
    );
    Ok((left_table?, right_table?))
}

/// Run a full merge as configured
pub fn run(config: &Config) -> Result<MergeReport> {
    let (left_file, right_file) = select_inputs(&config.inputs)?;
    let (left, right) = load_pair(left_file, right_file)?;

    let outcome = MergeEngine::new(config.merge).merge(&left, &right);
    log_info!(
        component = "pipeline",
        event = "merge_finished",
        left_rows = outcome.stats.left_rows,
        right_rows = outcome.stats.right_rows,
        matched = outcome.stats.matched,
        unmatched = outcome.stats.unmatched,
        duplicate_right_keys = outcome.stats.duplicate_right_keys,
    );

    let output_file = if config.stats_only {
        None
    } else {
        write_output(config, &outcome.table)?;
        Some(config.output_file.clone())
    };

    Ok(MergeReport {
        left_file: left_file.to_path_buf(),
        right_file: right_file.to_path_buf(),
        output_file,
        outcome,
    })
}

fn write_output(config: &Config, table: &Table) -> Result<()> {
    let encoder = EncoderFactory::from_config(config);
    let bytes = encoder.encode(table)?;

    fs::write(&config.output_file, &bytes).map_err(|source| Error::Write {
        path: config.output_file.clone(),
        source,
    })?;

    log_info!(
        component = "pipeline",
        event = "output_written",
        path = %config.output_file.display(),
        format = ?config.resolved_output_format(),
        bytes = bytes.len(),
    );
    Ok(())
}
