//! vlookup - left-join two spreadsheets on their first column

use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use vlookup::config::{
    Config, EmptyKeyPolicy, OutputFormat, PaddingPolicy, DEFAULT_OUTPUT, DEFAULT_SHEET_NAME,
};
use vlookup::pipeline::{self, MergeReport};
use vlookup::preview::{write_preview, write_summary, DEFAULT_PREVIEW_ROWS};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Xlsx,
    Csv,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Xlsx => OutputFormat::Xlsx,
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

/// Left-join two tables on their first column (VLOOKUP-style merge)
#[derive(Parser, Debug)]
#[command(name = "vlookup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Left table, then right table (xlsx, xls, ods, csv, parquet, json)
    files: Vec<PathBuf>,

    /// Where to write the merged table
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Output format (default: from the output extension, else xlsx)
    #[arg(short, long, value_enum)]
    format: Option<CliOutputFormat>,

    /// Sheet name for xlsx output
    #[arg(long, default_value = DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// Pad unmatched rows to the right table's width instead of one empty cell
    #[arg(long)]
    pad_to_right_width: bool,

    /// Never match rows whose key cell is empty
    #[arg(long)]
    unmatched_empty_keys: bool,

    /// Print the first ROWS merged rows (`--preview` or `--preview=ROWS`, default 20)
    #[arg(long, value_name = "ROWS", num_args = 0..=1, require_equals = true)]
    preview: Option<Option<usize>>,

    /// Only show statistics, do not write the output
    #[arg(long)]
    stats: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        let mut config = Config::default()
            .with_inputs(self.files)
            .with_output_file(self.output)
            .with_sheet_name(self.sheet_name)
            .with_stats_only(self.stats);

        if let Some(format) = self.format {
            config = config.with_output_format(format.into());
        }
        if self.pad_to_right_width {
            config = config.with_padding(PaddingPolicy::RightWidth);
        }
        if self.unmatched_empty_keys {
            config = config.with_empty_keys(EmptyKeyPolicy::NeverMatch);
        }
        if let Some(rows) = self.preview {
            config = config.with_preview_rows(rows.unwrap_or(DEFAULT_PREVIEW_ROWS));
        }
        config
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = cli.into_config();
    let report = pipeline::run(&config)?;

    report_result(&config, &report).context("Failed to write report")
}

fn report_result(config: &Config, report: &MergeReport) -> Result<()> {
    let color = if std::io::stdout().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(color);
    let stats = &report.outcome.stats;

    if let Some(rows) = config.preview_rows {
        write_preview(&report.outcome.table, rows, &mut stdout)?;
    }

    if config.stats_only {
        writeln!(
            stdout,
            "Left file:  {} ({} rows)",
            report.left_file.display(),
            stats.left_rows
        )?;
        writeln!(
            stdout,
            "Right file: {} ({} rows)",
            report.right_file.display(),
            stats.right_rows
        )?;
        writeln!(stdout)?;
        writeln!(stdout, "Matched:   {}", stats.matched)?;
        writeln!(stdout, "Unmatched: {}", stats.unmatched)?;
        writeln!(stdout, "Duplicate right keys: {}", stats.duplicate_right_keys)?;
        return Ok(());
    }

    write_summary(stats, &mut stdout)?;
    if let Some(output) = &report.output_file {
        writeln!(stdout, "Wrote {}", output.display())?;
    }
    Ok(())
}
