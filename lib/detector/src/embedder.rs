//! Text embedding
//!
//! The detector only ever needs two things from an embedder: a fixed output
//! dimension and a batch encode call. Explanation texts are always embedded
//! in one batch so a remote embedding service costs one round trip per
//! detector operation, not one per row.

use anomx_core::{Embedding, Result};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Output dimension of the default embedder. Matches the sentence-encoder
/// family commonly used for explanation texts.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Capability contract for mapping free text to fixed-length vectors.
///
/// Implementations must be deterministic: the same text always maps to the
/// same vector, since stored embeddings are compared against fresh ones
/// across process restarts.
pub trait TextEmbedder {
    /// Output dimension, constant for the lifetime of the embedder.
    fn dim(&self) -> usize;

    /// Embed a batch of texts, one vector per input in order.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>>;
}

/// Deterministic hashing embedder.
///
/// Buckets character trigrams and whole words into a fixed-size vector and
/// normalizes to unit length. Not a semantic model, but deterministic,
/// dependency-free, and close texts share buckets, which is enough for the
/// similarity gate and for tests. Swap in a real sentence encoder through
/// [`TextEmbedder`] for production quality.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dim: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_EMBEDDING_DIM)
    }
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() as usize) % self.dim
    }

    fn encode_one(&self, text: &str) -> Embedding {
        let mut data = vec![0.0f32; self.dim];
        let normalized = text.to_lowercase();

        // Character trigrams over the padded text.
        let padded: Vec<char> = format!(" {normalized} ").chars().collect();
        for window in padded.windows(3) {
            let trigram: String = window.iter().collect();
            data[self.bucket(&trigram)] += 1.0;
        }

        // Whole words carry more weight than their trigrams.
        for word in normalized.split_whitespace() {
            data[self.bucket(word)] += 2.0;
        }

        let mut embedding = Embedding::new(data);
        embedding.normalize();
        embedding
    }
}

impl TextEmbedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        Ok(texts.iter().map(|t| self.encode_one(t)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let embedder = HashingEmbedder::new(64);
        let a = embedder.encode_batch(&["sudden price drop"]).unwrap();
        let b = embedder.encode_batch(&["sudden price drop"]).unwrap();
        assert_eq!(a[0], b[0]);
    }

    #[test]
    fn test_output_dimension() {
        let embedder = HashingEmbedder::new(128);
        let out = embedder.encode_batch(&["x", "longer explanation text"]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|e| e.dim() == 128));
    }

    #[test]
    fn test_identical_text_max_similarity() {
        let embedder = HashingEmbedder::default();
        let out = embedder.encode_batch(&["flash crash", "flash crash"]).unwrap();
        assert!((out[0].cosine_similarity(&out[1]) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_related_text_beats_unrelated() {
        let embedder = HashingEmbedder::default();
        let out = embedder
            .encode_batch(&[
                "sudden flash crash in price",
                "flash crash in the price series",
                "regulatory filing deadline extended",
            ])
            .unwrap();
        let related = out[0].cosine_similarity(&out[1]);
        let unrelated = out[0].cosine_similarity(&out[2]);
        assert!(related > unrelated);
    }

    #[test]
    fn test_empty_text_embeds_to_zero_vector() {
        let embedder = HashingEmbedder::new(32);
        let out = embedder.encode_batch(&[""]).unwrap();
        // No trigrams, no words: stays the zero vector, so cosine against
        // any stored record is 0.
        assert!(out[0].as_slice().iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_normalized_output() {
        let embedder = HashingEmbedder::default();
        let out = embedder.encode_batch(&["volume surge after listing"]).unwrap();
        let norm: f32 = out[0].as_slice().iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-3);
    }
}
