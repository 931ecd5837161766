//! Record sources
//!
//! A [`RecordSource`] turns an external origin into a lazy stream of records.
//! Each call to `load` consumes the origin once; the returned iterator owns
//! whatever handle it reads from and releases it when dropped.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info, trace};

use crate::data::record::CarPassport;
use crate::data::schema::{Field, FIELD_NAMES};
use crate::error::{RecordError, Result};

/// Lazy, finite stream of records produced by a source
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<CarPassport>> + 'a>;

pub trait RecordSource {
    /// Open the origin and stream its records
    fn load(&mut self) -> Result<RecordIter<'_>>;
}

/// Delimited-text file with a header line followed by one record per line.
#[derive(Debug, Clone)]
pub struct DelimitedTextSource {
    path: PathBuf,
    delimiter: u8,
}

impl DelimitedTextSource {
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

impl RecordSource for DelimitedTextSource {
    fn load(&mut self) -> Result<RecordIter<'_>> {
        let origin = self.path.display().to_string();
        info!("Loading records from {}", origin);

        let file = File::open(&self.path).map_err(|source| RecordError::SourceNotFound {
            origin: origin.clone(),
            source,
        })?;

        let records = DelimitedRecords::from_reader(file, self.delimiter, origin)?;
        Ok(Box::new(records))
    }
}

/// Streaming decoder over any delimited-text reader.
///
/// The header is read eagerly so a bad header fails before any record is
/// produced. Data lines are decoded one at a time; the stream stops after the
/// first error.
pub struct DelimitedRecords<R> {
    reader: csv::Reader<R>,
    /// File column for each field, indexed by `Field::position`
    columns: [usize; 4],
    row: StringRecord,
    origin: String,
    decoded: usize,
    done: bool,
}

impl<R: Read> DelimitedRecords<R> {
    pub fn from_reader(reader: R, delimiter: u8, origin: impl Into<String>) -> Result<Self> {
        let origin = origin.into();

        // Quoting is off: a quote character is ordinary data and an embedded
        // delimiter always splits the line.
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        let mut header = StringRecord::new();
        let has_header = reader
            .read_record(&mut header)
            .map_err(|err| convert_read_error(&origin, 1, err))?;
        if !has_header {
            return Err(RecordError::malformed(1, "missing header line"));
        }

        let columns = resolve_columns(&header)?;
        debug!("Header of {} resolved to columns {:?}", origin, columns);

        Ok(Self {
            reader,
            columns,
            row: StringRecord::new(),
            origin,
            decoded: 0,
            done: false,
        })
    }

    fn decode_row(&self) -> Result<CarPassport> {
        let line = self
            .row
            .position()
            .map(|pos| pos.line())
            .unwrap_or_else(|| self.reader.position().line());

        if self.row.len() != FIELD_NAMES.len() {
            return Err(RecordError::malformed(
                line,
                format!(
                    "expected {} fields, found {}",
                    FIELD_NAMES.len(),
                    self.row.len()
                ),
            ));
        }

        let cell = |field: Field| self.row.get(self.columns[field.position()]).unwrap_or_default();

        let raw_number = cell(Field::Number);
        let number = raw_number.parse::<i64>().map_err(|_| {
            RecordError::malformed(line, format!("number '{}' is not an integer", raw_number))
        })?;

        Ok(CarPassport::new(
            number,
            cell(Field::Timestamp),
            cell(Field::Plate),
            cell(Field::Brand),
        ))
    }
}

impl<R: Read> Iterator for DelimitedRecords<R> {
    type Item = Result<CarPassport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = match self.reader.read_record(&mut self.row) {
            Ok(true) => self.decode_row(),
            Ok(false) => {
                self.done = true;
                debug!("Decoded {} records from {}", self.decoded, self.origin);
                return None;
            }
            Err(err) => {
                let line = self.reader.position().line();
                Err(convert_read_error(&self.origin, line, err))
            }
        };

        match &item {
            Ok(record) => {
                trace!("Decoded record #{}", record.number);
                self.decoded += 1;
            }
            Err(_) => self.done = true,
        }
        Some(item)
    }
}

/// Map header names to file columns. The header must name each field exactly once.
fn resolve_columns(header: &StringRecord) -> Result<[usize; 4]> {
    if header.len() != FIELD_NAMES.len() {
        return Err(RecordError::malformed(
            1,
            format!(
                "header has {} fields, expected {}",
                header.len(),
                FIELD_NAMES.len()
            ),
        ));
    }

    let mut columns = [None; 4];
    for (index, raw) in header.iter().enumerate() {
        let name = raw.trim_start_matches('\u{feff}').trim();
        let field = Field::from_name(name)
            .map_err(|_| RecordError::malformed(1, format!("unexpected header field '{}'", name)))?;

        let slot = &mut columns[field.position()];
        if slot.is_some() {
            return Err(RecordError::malformed(
                1,
                format!("header field '{}' appears twice", name),
            ));
        }
        *slot = Some(index);
    }

    // Four distinct names out of four means every slot is filled.
    Ok(columns.map(|column| column.unwrap_or_default()))
}

fn convert_read_error(origin: &str, line: u64, err: csv::Error) -> RecordError {
    match err.into_kind() {
        csv::ErrorKind::Io(source) => RecordError::SourceNotFound {
            origin: origin.to_string(),
            source,
        },
        csv::ErrorKind::Utf8 { pos, err } => RecordError::malformed(
            pos.map(|pos| pos.line()).unwrap_or(line),
            format!("invalid UTF-8: {}", err),
        ),
        other => RecordError::malformed(line, format!("{:?}", other)),
    }
}

/// In-memory source over an owned list of records.
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    records: Vec<CarPassport>,
}

impl VecSource {
    pub fn new(records: Vec<CarPassport>) -> Self {
        Self { records }
    }
}

impl RecordSource for VecSource {
    fn load(&mut self) -> Result<RecordIter<'_>> {
        let records = std::mem::take(&mut self.records);
        Ok(Box::new(records.into_iter().map(Ok)))
    }
}
