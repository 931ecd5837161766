//! Record sinks: table display and delimited-text export

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use comfy_table::presets::{ASCII_FULL, UTF8_FULL};
use comfy_table::{Attribute, Cell, ContentArrangement, Table};
use crossterm::style::Stylize;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::data::record::CarPassport;
use crate::data::schema::{RecordSchema, FIELD_NAMES};
use crate::error::{RecordError, Result};

pub trait RecordSink {
    /// Render `records` in order. Must not modify them.
    fn dump(&mut self, records: &[CarPassport]) -> Result<()>;
}

/// Border drawing for rendered tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableStyle {
    #[default]
    Ascii,
    Utf8,
}

/// Renders records as a fixed-column text table on a display channel.
pub struct TableRenderSink<W: Write> {
    out: W,
    style: TableStyle,
    show_row_count: bool,
}

impl<W: Write> TableRenderSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            style: TableStyle::default(),
            show_row_count: true,
        }
    }

    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_row_count(mut self, show_row_count: bool) -> Self {
        self.show_row_count = show_row_count;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn build_table(&self, records: &[CarPassport]) -> Table {
        let mut table = Table::new();
        table.load_preset(match self.style {
            TableStyle::Ascii => ASCII_FULL,
            TableStyle::Utf8 => UTF8_FULL,
        });
        table.set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(
            FIELD_NAMES
                .iter()
                .map(|name| Cell::new(name).add_attribute(Attribute::Bold)),
        );

        for record in records {
            table.add_row(RecordSchema::to_row(record));
        }

        table
    }
}

impl<W: Write> RecordSink for TableRenderSink<W> {
    fn dump(&mut self, records: &[CarPassport]) -> Result<()> {
        let table = self.build_table(records);

        let mut render = || -> io::Result<()> {
            writeln!(self.out, "{table}")?;
            if records.is_empty() {
                writeln!(self.out, "{}", "No records.".yellow())?;
            } else if self.show_row_count {
                writeln!(self.out, "{}", format!("{} rows", records.len()).green())?;
            }
            self.out.flush()
        };

        render().map_err(|source| RecordError::DestinationWrite {
            destination: "display".to_string(),
            source,
        })
    }
}

/// Writes a header line plus one delimited line per record, replacing any
/// existing file content.
#[derive(Debug, Clone)]
pub struct DelimitedTextSink {
    path: PathBuf,
    delimiter: u8,
}

impl DelimitedTextSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            delimiter: b',',
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl RecordSink for DelimitedTextSink {
    fn dump(&mut self, records: &[CarPassport]) -> Result<()> {
        let destination = self.path.display().to_string();
        let write_error = |source: io::Error| RecordError::DestinationWrite {
            destination: destination.clone(),
            source,
        };

        let file = File::create(&self.path).map_err(write_error)?;
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(file);

        writer
            .write_record(FIELD_NAMES)
            .map_err(|err| write_error(into_io_error(err)))?;

        for record in records {
            let row = RecordSchema::to_row(record);
            writer
                .write_record(row.iter().map(|value| value.as_bytes()))
                .map_err(|err| write_error(into_io_error(err)))?;
        }

        writer.flush().map_err(write_error)?;

        info!("Wrote {} records to {}", records.len(), destination);
        Ok(())
    }
}

fn into_io_error(err: csv::Error) -> io::Error {
    match err.into_kind() {
        csv::ErrorKind::Io(err) => err,
        other => io::Error::new(io::ErrorKind::Other, format!("{:?}", other)),
    }
}
