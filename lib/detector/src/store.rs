//! Explanation store
//!
//! An append-only bank of natural-language anomaly explanations and their
//! cached embeddings. Owned by exactly one detector instance; grown via the
//! initial fit and via confirmed feedback, never pruned or deduplicated.

use anomx_core::Embedding;
use serde::{Deserialize, Serialize};

/// A natural-language explanation as produced upstream, before embedding.
///
/// Records arriving from the explanation generator can be partial; both
/// fields default (empty text / not anomalous) so a missing key degrades
/// instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Explanation {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub is_anomaly: bool,
}

impl Explanation {
    pub fn new(text: impl Into<String>, is_anomaly: bool) -> Self {
        Self {
            text: text.into(),
            is_anomaly,
        }
    }
}

/// A stored explanation with its cached embedding.
///
/// Invariant: `text` is non-empty and `embedding` has the embedder's output
/// dimension. Enforced by the detector when records are created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExplanationRecord {
    pub text: String,
    pub is_anomaly: bool,
    pub embedding: Embedding,
}

/// Best stored match for a query embedding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestMatch {
    /// Maximum cosine similarity over the store.
    pub similarity: f32,
    /// Anomaly flag of the argmax record.
    pub is_anomaly: bool,
}

/// Ordered, append-only sequence of explanation records.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExplanationStore {
    records: Vec<ExplanationRecord>,
}

impl ExplanationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_records(records: Vec<ExplanationRecord>) -> Self {
        Self { records }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn records(&self) -> &[ExplanationRecord] {
        &self.records
    }

    /// Append records in order.
    pub fn append(&mut self, records: impl IntoIterator<Item = ExplanationRecord>) {
        self.records.extend(records);
    }

    /// Drop all current records and install a new batch. Used only by the
    /// seeding path of `fit`.
    pub fn replace(&mut self, records: Vec<ExplanationRecord>) {
        self.records = records;
    }

    /// Maximum cosine similarity between `query` and any stored record,
    /// together with the argmax record's anomaly flag. `None` on an empty
    /// store. The first maximal record in store order wins ties.
    pub fn best_match(&self, query: &Embedding) -> Option<BestMatch> {
        let mut best: Option<BestMatch> = None;
        for record in &self.records {
            let similarity = query.cosine_similarity(&record.embedding);
            let better = match best {
                Some(b) => similarity > b.similarity,
                None => true,
            };
            if better {
                best = Some(BestMatch {
                    similarity,
                    is_anomaly: record.is_anomaly,
                });
            }
        }
        best
    }
}
