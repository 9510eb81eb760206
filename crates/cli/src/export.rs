//! Rendering and writing of exported tables.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::args::OutputFormat;

/// A record that can be written as one CSV line.
pub trait CsvRecord {
    const HEADER: &'static str;

    fn to_csv(&self) -> String;
}

/// Render `records` as CSV (with header) or as a pretty JSON array.
pub fn render<T: CsvRecord + Serialize>(records: &[T], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Csv => {
            let mut content = String::with_capacity(64 * (records.len() + 1));
            content.push_str(T::HEADER);
            content.push('\n');
            for record in records {
                content.push_str(&record.to_csv());
                content.push('\n');
            }
            Ok(content)
        }
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).context("Failed to serialize records")
        }
    }
}

/// Write `content` to `output`, or print it when no file is given.
///
/// Stdout only ever carries exported data; status lines go to stderr.
pub fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        eprintln!("✓ Data exported to: {}", path.display());
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Render and emit in one go.
pub fn export<T: CsvRecord + Serialize>(
    records: &[T],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let content = render(records, format)?;
    emit(&content, output)
}
