//! Terminal preview of a merge

use std::io::{self, Write};

use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::merge::MergeStats;
use crate::model::Table;

/// Default number of rows shown by a preview
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Print the first `limit` rows of `table` as a box table
pub fn write_preview(table: &Table, limit: usize, writer: &mut dyn Write) -> io::Result<()> {
    if table.is_empty() {
        writeln!(writer, "(no rows)")?;
        return Ok(());
    }

    let shown = &table.rows[..limit.min(table.row_count())];
    let width = shown.iter().map(|r| r.len()).max().unwrap_or(0).max(1);

    let mut builder = Builder::default();
    for row in shown {
        let mut record: Vec<String> = row.cells.iter().map(|c| c.display().into_owned()).collect();
        record.resize(width, String::new());
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::modern());
    writeln!(writer, "{}", rendered)?;

    if shown.len() < table.row_count() {
        writeln!(writer, "... {} more rows", table.row_count() - shown.len())?;
    }
    Ok(())
}

/// Print the match summary, coloring matched and unmatched counts
pub fn write_summary(stats: &MergeStats, writer: &mut dyn WriteColor) -> io::Result<()> {
    write!(writer, "Summary: ")?;
    write_count(writer, stats.matched, "matched", Color::Green)?;
    write!(writer, ", ")?;
    let unmatched_color = if stats.unmatched == 0 {
        Color::Green
    } else {
        Color::Yellow
    };
    write_count(writer, stats.unmatched, "unmatched", unmatched_color)?;
    writeln!(
        writer,
        " (out of {} left rows, {} right rows)",
        stats.left_rows, stats.right_rows
    )?;

    if stats.duplicate_right_keys > 0 {
        writeln!(
            writer,
            "Ignored {} right rows repeating an earlier key",
            stats.duplicate_right_keys
        )?;
    }
    Ok(())
}

fn write_count(
    writer: &mut dyn WriteColor,
    count: usize,
    label: &str,
    color: Color,
) -> io::Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(writer, "{} {}", count, label)?;
    writer.reset()
}
