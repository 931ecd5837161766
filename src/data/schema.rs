//! Fixed field layout of a passport record
//!
//! Field names, their serialization order and the mapping from a name to the
//! record's value all live here. Every other module goes through [`Field`]
//! rather than matching on raw strings.

use std::borrow::Cow;

use crate::data::record::CarPassport;
use crate::error::{RecordError, Result};

/// Field names in serialization order.
pub const FIELD_NAMES: [&str; 4] = ["number", "timestamp", "plate", "brand"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Number,
    Timestamp,
    Plate,
    Brand,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Number, Field::Timestamp, Field::Plate, Field::Brand];

    /// Resolve a field by its exact name
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "number" => Ok(Field::Number),
            "timestamp" => Ok(Field::Timestamp),
            "plate" => Ok(Field::Plate),
            "brand" => Ok(Field::Brand),
            _ => Err(RecordError::unknown_field(name)),
        }
    }

    pub fn name(self) -> &'static str {
        FIELD_NAMES[self.position()]
    }

    /// Column position in the serialized layout
    pub fn position(self) -> usize {
        match self {
            Field::Number => 0,
            Field::Timestamp => 1,
            Field::Plate => 2,
            Field::Brand => 3,
        }
    }

    /// Text form of this field on `record`. `number` is rendered as its decimal
    /// string, which is also what sorting and filtering compare on.
    pub fn value<'a>(self, record: &'a CarPassport) -> Cow<'a, str> {
        match self {
            Field::Number => Cow::Owned(record.number.to_string()),
            Field::Timestamp => Cow::Borrowed(&record.timestamp),
            Field::Plate => Cow::Borrowed(&record.plate),
            Field::Brand => Cow::Borrowed(&record.brand),
        }
    }
}

/// Name-based access to the passport layout.
pub struct RecordSchema;

impl RecordSchema {
    pub fn field_names() -> [&'static str; 4] {
        FIELD_NAMES
    }

    pub fn value_of<'a>(record: &'a CarPassport, field_name: &str) -> Result<Cow<'a, str>> {
        Ok(Field::from_name(field_name)?.value(record))
    }

    /// Record as a row of strings in schema order
    pub fn to_row(record: &CarPassport) -> [Cow<'_, str>; 4] {
        Field::ALL.map(|field| field.value(record))
    }
}
