//! Record layer
//!
//! Sources produce records, the collection holds and queries them, and sinks
//! render them back out.

pub mod collection;
pub mod record;
pub mod schema;
pub mod sink;
pub mod source;

pub use collection::RecordCollection;
pub use record::CarPassport;
pub use schema::{Field, RecordSchema, FIELD_NAMES};
pub use sink::{DelimitedTextSink, RecordSink, TableRenderSink, TableStyle};
pub use source::{DelimitedTextSource, RecordIter, RecordSource, VecSource};
