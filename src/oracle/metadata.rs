//! Pair metadata registered on the oracle contract

use std::collections::HashMap;

use crate::types::PairMetadata;

/// Canonical pair name -> metadata, rebuilt every polling cycle
#[derive(Debug, Clone, Default)]
pub struct PairMetadataStore {
    pairs: HashMap<String, PairMetadata>,
}

impl PairMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `pairs` table rows, keeping only active pairs
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = PairMetadata>,
    {
        let pairs = rows
            .into_iter()
            .filter(PairMetadata::is_active)
            .map(|row| (row.name.clone(), row))
            .collect();
        Self { pairs }
    }

    /// Add or replace a pair. Inactive rows remove any earlier entry.
    pub fn insert(&mut self, meta: PairMetadata) {
        if meta.is_active() {
            self.pairs.insert(meta.name.clone(), meta);
        } else {
            self.pairs.remove(&meta.name);
        }
    }

    /// Metadata for an active pair
    pub fn get(&self, name: &str) -> Option<&PairMetadata> {
        self.pairs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<PairMetadata> for PairMetadataStore {
    fn from_iter<T: IntoIterator<Item = PairMetadata>>(iter: T) -> Self {
        Self::from_rows(iter)
    }
}
