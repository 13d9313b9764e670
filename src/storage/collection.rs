//! Insertion-ordered in-memory record collection
//!
//! A [`Collection`] keeps records in the order their keys were first seen.
//! Upserting an existing key replaces the record in place. Every stored vector
//! must match the collection dimension.

use crate::error::{RagError, Result};
use crate::ml::search::{self, SearchResult};
use crate::storage::schema::Movie;
use std::collections::HashMap;

/// Keyed, insertion-ordered set of movie records sharing one vector dimension
#[derive(Debug, Clone)]
pub struct Collection {
    /// Collection name
    name: String,
    /// Vector dimensionality shared by all records
    dimension: usize,
    /// Records in first-insertion order
    records: Vec<Movie>,
    /// Key to position in `records`
    positions: HashMap<u64, usize>,
}

impl Collection {
    /// Create an empty collection
    pub fn new(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            dimension,
            records: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Insert or overwrite a record by key
    pub fn upsert(&mut self, record: Movie) -> Result<()> {
        if record.vector.len() != self.dimension {
            return Err(RagError::DimensionMismatch {
                expected: self.dimension,
                actual: record.vector.len(),
            });
        }

        match self.positions.get(&record.key) {
            Some(&position) => {
                log::debug!(
                    "Replacing record {} in collection '{}'",
                    record.key,
                    self.name
                );
                self.records[position] = record;
            }
            None => {
                self.positions.insert(record.key, self.records.len());
                self.records.push(record);
            }
        }

        Ok(())
    }

    /// Look up a record by key
    pub fn get(&self, key: u64) -> Option<&Movie> {
        self.positions.get(&key).map(|&position| &self.records[position])
    }

    /// Iterate over all records in insertion order.
    ///
    /// Each call yields a fresh iterator over the current contents.
    pub fn get_all(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.records.iter()
    }

    /// Top-k cosine search over this collection
    pub fn search(&self, query: &[f32], top: usize) -> Result<Vec<SearchResult>> {
        search::search(query, self, top)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
