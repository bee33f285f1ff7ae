//! Quote batch assembly

use serde::Serialize;

use crate::types::QuoteRecord;

/// Ordered quotes for one `write` action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuoteBatch {
    records: Vec<QuoteRecord>,
}

impl QuoteBatch {
    /// Normalizer output first, then the single-pair quote when one exists
    pub fn assemble(normalized: Vec<QuoteRecord>, single: Option<QuoteRecord>) -> Self {
        let mut records = normalized;
        records.extend(single);
        Self { records }
    }

    pub fn records(&self) -> &[QuoteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pairs(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.pair.as_str()).collect()
    }
}

impl From<Vec<QuoteRecord>> for QuoteBatch {
    fn from(records: Vec<QuoteRecord>) -> Self {
        Self { records }
    }
}
