//! # anomx
//!
//! Semi-supervised anomaly detection for price series.
//!
//! anomx fuses an unsupervised outlier scorer with weak supervision from
//! natural-language anomaly explanations: predictions start from a numeric
//! ensemble and are revised by cosine similarity against a human-curated
//! bank of explanation embeddings. Confirmed feedback grows the bank
//! without ever retraining the numeric model.
//!
//! ## Quick Start
//!
//! ```rust
//! use anomx::prelude::*;
//!
//! // Fit on a training window of engineered price features.
//! let train = FeatureMatrix::from_rows(&[
//!     vec![0.01, 0.02, 0.00],
//!     vec![0.00, 0.01, 0.01],
//!     vec![0.02, 0.00, 0.02],
//!     vec![9.50, 8.70, 9.10], // flagged by an analyst
//! ]).unwrap();
//! let seed = vec![Explanation::new("flash crash on exchange outage", true)];
//!
//! let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
//! detector.fit(&train, Some(&seed)).unwrap();
//!
//! // Label a fresh window; scores are sign-oriented so larger = more anomalous.
//! let labels = detector.predict(&train, None).unwrap();
//! let scores = detector.score_samples(&train).unwrap();
//! assert_eq!(labels.len(), scores.len());
//! ```
//!
//! ## Crate Structure
//!
//! anomx is composed of several crates:
//!
//! - [`anomx-core`](https://docs.rs/anomx-core) - feature matrices, embeddings, labels, errors
//! - [`anomx-detector`](https://docs.rs/anomx-detector) - the semi-supervised detector core
//! - [`anomx-storage`](https://docs.rs/anomx-storage) - snapshots and result caching
//!
//! ## Features
//!
//! - **Capability traits**: swap in any outlier scorer or text embedder
//! - **One-directional fusion**: text evidence promotes, never vetoes
//! - **Feedback loop**: human-confirmed explanations sharpen future labels
//! - **Persistence**: checksummed snapshots that round-trip labels and scores

// Re-export core types
pub use anomx_core::{Embedding, Error, FeatureMatrix, Label, Result};

// Re-export the detector
pub use anomx_detector::{
    BestMatch, DetectorConfig, DeviationEnsemble, Explanation, ExplanationRecord,
    ExplanationStore, HashingEmbedder, OutlierScorer, SemiSupervisedDetector, TextEmbedder,
    DEFAULT_EMBEDDING_DIM,
};

// Re-export storage
pub use anomx_storage::{window_fingerprint, CachedResult, DetectorSnapshot, ResultCache, SnapshotManager};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        window_fingerprint, CachedResult, DetectorConfig, DetectorSnapshot, DeviationEnsemble,
        Embedding, Error, Explanation, ExplanationRecord, ExplanationStore, FeatureMatrix,
        HashingEmbedder, Label, OutlierScorer, Result, ResultCache, SemiSupervisedDetector,
        SnapshotManager, TextEmbedder,
    };
}
