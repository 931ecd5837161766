//! In-memory record collection
//!
//! Records are kept in an ordered `Vec` together with a `number -> position`
//! index. Every mutation rebuilds the index before returning, so lookups never
//! see a stale position.

use std::collections::HashMap;

use tracing::{debug, info};

use crate::data::record::CarPassport;
use crate::data::schema::Field;
use crate::data::sink::RecordSink;
use crate::data::source::RecordSource;
use crate::error::{RecordError, Result};

#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<CarPassport>,
    index: HashMap<i64, usize>,
}

impl RecordCollection {
    /// Drain `source` into a new collection.
    ///
    /// Any source error aborts the load and no collection is returned. When two
    /// records share a number both are kept, and the index points at the later one.
    pub fn load(source: &mut dyn RecordSource) -> Result<Self> {
        let records = source.load()?.collect::<Result<Vec<_>>>()?;

        let mut collection = Self {
            records,
            index: HashMap::new(),
        };
        collection.reindex();

        info!("Loaded {} records", collection.records.len());
        Ok(collection)
    }

    /// Keep only records whose `field_name` text equals `value` exactly
    pub fn filter(&mut self, field_name: &str, value: &str) -> Result<()> {
        let field = Field::from_name(field_name)?;
        let before = self.records.len();

        self.records.retain(|record| field.value(record) == value);
        self.reindex();

        debug!(
            "Filter {} = {:?} kept {} of {} records",
            field.name(),
            value,
            self.records.len(),
            before
        );
        Ok(())
    }

    /// Stable ascending sort on the text form of `field_name`.
    ///
    /// Comparison is lexicographic for every field, `number` included, so
    /// `"10" < "2" < "33"`.
    pub fn sort(&mut self, field_name: &str) -> Result<()> {
        let field = Field::from_name(field_name)?;

        self.records
            .sort_by(|a, b| field.value(a).cmp(&field.value(b)));
        self.reindex();

        debug!("Sorted {} records by {}", self.records.len(), field.name());
        Ok(())
    }

    pub fn get(&self, number: i64) -> Result<&CarPassport> {
        self.index
            .get(&number)
            .and_then(|&position| self.records.get(position))
            .ok_or(RecordError::NotFound { number })
    }

    /// Iterate the current records in order. Restartable: each call starts over.
    pub fn iter(&self) -> std::slice::Iter<'_, CarPassport> {
        self.records.iter()
    }

    pub fn records(&self) -> &[CarPassport] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn export(&self, sink: &mut dyn RecordSink) -> Result<()> {
        sink.dump(&self.records)
    }

    fn reindex(&mut self) {
        // Later duplicates overwrite earlier entries.
        self.index = self
            .records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.number, position))
            .collect();
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a CarPassport;
    type IntoIter = std::slice::Iter<'a, CarPassport>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::source::VecSource;

    fn collection_of(records: Vec<CarPassport>) -> RecordCollection {
        RecordCollection::load(&mut VecSource::new(records)).unwrap()
    }

    fn numbers(collection: &RecordCollection) -> Vec<i64> {
        collection.iter().map(|record| record.number).collect()
    }

    fn assert_index_consistent(collection: &RecordCollection) {
        for record in collection {
            assert_eq!(collection.get(record.number).unwrap(), record);
        }
    }

    #[test]
    fn test_empty_collection() {
        let collection = RecordCollection::default();
        assert!(collection.is_empty());
        assert!(collection.get(1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_duplicate_number_last_write_wins() {
        let collection = collection_of(vec![
            CarPassport::new(1, "t1", "AA001", "Toyota"),
            CarPassport::new(1, "t2", "BB002", "Honda"),
        ]);
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(1).unwrap().brand, "Honda");
    }

    #[test]
    fn test_sort_by_number_is_lexicographic() {
        let mut collection = collection_of(vec![
            CarPassport::new(33, "t", "p", "b"),
            CarPassport::new(2, "t", "p", "b"),
            CarPassport::new(10, "t", "p", "b"),
        ]);
        collection.sort("number").unwrap();
        assert_eq!(numbers(&collection), vec![10, 2, 33]);
        assert_index_consistent(&collection);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut collection = collection_of(vec![
            CarPassport::new(1, "t", "p", "Honda"),
            CarPassport::new(2, "t", "p", "Audi"),
            CarPassport::new(3, "t", "p", "Honda"),
            CarPassport::new(4, "t", "p", "Audi"),
        ]);
        collection.sort("brand").unwrap();
        assert_eq!(numbers(&collection), vec![2, 4, 1, 3]);
        assert_index_consistent(&collection);
    }

    #[test]
    fn test_filter_is_exact_and_idempotent() {
        let mut collection = collection_of(vec![
            CarPassport::new(1, "t", "p", "Honda"),
            CarPassport::new(2, "t", "p", "honda"),
            CarPassport::new(3, "t", "p", "Honda "),
            CarPassport::new(4, "t", "p", "Honda"),
        ]);
        collection.filter("brand", "Honda").unwrap();
        assert_eq!(numbers(&collection), vec![1, 4]);

        collection.filter("brand", "Honda").unwrap();
        assert_eq!(numbers(&collection), vec![1, 4]);
        assert_index_consistent(&collection);
        assert!(collection.get(2).unwrap_err().is_not_found());
    }

    #[test]
    fn test_filter_on_number_text() {
        let mut collection = collection_of(vec![
            CarPassport::new(7, "t", "p", "b"),
            CarPassport::new(70, "t", "p", "b"),
        ]);
        collection.filter("number", "7").unwrap();
        assert_eq!(numbers(&collection), vec![7]);
    }

    #[test]
    fn test_unknown_field_leaves_collection_untouched() {
        let mut collection = collection_of(vec![
            CarPassport::new(2, "t", "p", "b"),
            CarPassport::new(1, "t", "p", "b"),
        ]);
        assert!(matches!(
            collection.filter("colour", "red"),
            Err(RecordError::UnknownField { .. })
        ));
        assert!(matches!(
            collection.sort("colour"),
            Err(RecordError::UnknownField { .. })
        ));
        assert_eq!(numbers(&collection), vec![2, 1]);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let collection = collection_of(vec![
            CarPassport::new(1, "t", "p", "b"),
            CarPassport::new(2, "t", "p", "b"),
        ]);
        let first: Vec<_> = collection.iter().collect();
        let second: Vec<_> = collection.iter().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }
}
