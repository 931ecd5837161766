//! Command pipeline: directory count, load, filter, sort, display, export, lookup

use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

use crate::cli::Cli;
use crate::config::config::parse_delimiter;
use crate::config::Config;
use crate::error::RecordError;
use crate::data::{DelimitedTextSink, DelimitedTextSource, RecordCollection, TableRenderSink};
use crate::utils::fs_stats::count_files;

/// Config from `--config` when given, otherwise the default location
pub fn resolve_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

/// Write the commented default config to `--config` or the default location
pub fn generate_config(cli: &Cli) -> Result<PathBuf> {
    let path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::get_config_path()?,
    };
    Config::write_default(&path)?;
    Ok(path)
}

/// True when `err` is a lookup miss rather than a fatal failure
pub fn is_lookup_miss(err: &anyhow::Error) -> bool {
    err.downcast_ref::<RecordError>()
        .is_some_and(RecordError::is_not_found)
}

/// User-facing message for an error that ended the run
pub fn error_message(err: &anyhow::Error) -> String {
    if is_lookup_miss(err) {
        err.to_string()
    } else {
        format!("Error: {:#}", err)
    }
}

/// Run the record pipeline, writing all user-facing output to `out`
pub fn run(cli: &Cli, config: &Config, out: &mut dyn Write) -> Result<()> {
    let delimiter = match cli.delimiter {
        Some(delimiter) => parse_delimiter(delimiter)?,
        None => config.delimiter_byte()?,
    };

    if let Some(dir) = &cli.dir {
        let count = count_files(dir)?;
        writeln!(out, "Number of files in {}: {}", dir.display(), count)?;
    }

    let Some(csv_path) = &cli.csv else {
        return Ok(());
    };

    let mut source = DelimitedTextSource::new(csv_path).with_delimiter(delimiter);
    let mut collection = RecordCollection::load(&mut source)
        .with_context(|| format!("Failed to load {}", csv_path.display()))?;

    if let (Some(field), Some(value)) = (&cli.filter, &cli.value) {
        collection.filter(field, value)?;
        writeln!(out, "{}", format!("Filtered by {} = {}:", field, value).cyan())?;
    }

    if let Some(field) = &cli.sort {
        collection.sort(field)?;
        writeln!(out, "{}", format!("Sorted by {}:", field).cyan())?;
    }

    let mut table = TableRenderSink::new(&mut *out)
        .with_style(config.display.table_style)
        .with_row_count(config.display.show_row_count);
    collection.export(&mut table)?;

    if let Some(path) = &cli.out {
        writeln!(out, "Write data into outfile {}", path.display())?;
        let mut sink = DelimitedTextSink::new(path).with_delimiter(delimiter);
        collection.export(&mut sink)?;
    }

    if let Some(number) = cli.get {
        debug!("Looking up record #{}", number);
        writeln!(out, "Data item by the number #{}:", number)?;
        let record = collection.get(number)?;
        writeln!(out, "{}", record)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_message_for_lookup_miss() {
        let err = anyhow::Error::from(RecordError::NotFound { number: 42 });
        assert!(is_lookup_miss(&err));
        assert_eq!(error_message(&err), "No record with number #42");
    }

    #[test]
    fn test_error_message_for_fatal_error() {
        let err = Err::<(), _>(RecordError::unknown_field("colour"))
            .context("Failed to sort")
            .unwrap_err();
        assert!(!is_lookup_miss(&err));
        assert_eq!(
            error_message(&err),
            "Error: Failed to sort: unknown field 'colour' \
             (expected one of: number, timestamp, plate, brand)"
        );
    }
}
