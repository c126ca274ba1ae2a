//! Fingerprint-keyed result cache
//!
//! Detection output for a feature window is cached under a content
//! fingerprint of the window itself, not under wall-clock time or global
//! state. The cache is an explicit value the caller constructs, owns and
//! shares; entries expire after a fixed TTL.

use ahash::AHashMap;
use anomx_core::{FeatureMatrix, Label};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

/// SHA-256 content fingerprint of a feature window.
///
/// Covers the dimensions and every value in row-major order, so any change
/// to the window produces a different key.
pub fn window_fingerprint(x: &FeatureMatrix) -> String {
    let mut hasher = Sha256::new();
    hasher.update((x.rows() as u64).to_le_bytes());
    hasher.update((x.cols() as u64).to_le_bytes());
    for v in x.as_slice() {
        hasher.update(v.to_le_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// Labels and scores produced for one feature window.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult {
    pub labels: Vec<Label>,
    pub scores: Vec<f32>,
}

struct Entry {
    result: CachedResult,
    inserted_at: Instant,
}

impl Entry {
    fn expired(&self, ttl: Duration) -> bool {
        self.inserted_at.elapsed() >= ttl
    }
}

/// TTL-bound cache of detection results keyed by window fingerprint.
///
/// Read-mostly; a single writer lock guards mutation. Expired entries are
/// invisible to `get` and reclaimed by [`purge_expired`](Self::purge_expired)
/// or on overwrite.
pub struct ResultCache {
    ttl: Duration,
    entries: RwLock<AHashMap<String, Entry>>,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(AHashMap::new()),
        }
    }

    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fingerprint. Expired entries read as absent.
    pub fn get(&self, fingerprint: &str) -> Option<CachedResult> {
        let entries = self.entries.read();
        let entry = entries.get(fingerprint)?;
        if entry.expired(self.ttl) {
            return None;
        }
        Some(entry.result.clone())
    }

    pub fn insert(&self, fingerprint: String, result: CachedResult) {
        self.entries.write().insert(
            fingerprint,
            Entry {
                result,
                inserted_at: Instant::now(),
            },
        );
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let ttl = self.ttl;
        self.entries.write().retain(|_, e| !e.expired(ttl));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
