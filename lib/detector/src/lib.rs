//! # anomx Detector
//!
//! The semi-supervised core of anomx: an unsupervised outlier scorer whose
//! raw verdicts are revised using text-embedding similarity against a
//! growing, human-curated bank of natural-language anomaly explanations.
//!
//! ## Design
//!
//! - **Capability traits**: the base scorer ([`OutlierScorer`]) and the
//!   text embedder ([`TextEmbedder`]) are swappable; the provided
//!   [`DeviationEnsemble`] and [`HashingEmbedder`] satisfy them without
//!   external services.
//! - **One-directional fusion**: text similarity can promote a row to
//!   "anomaly" but never veto a base-flagged one.
//! - **Availability first**: a failing embedder degrades predictions to
//!   the pure numeric path; it never fails a batch.
//!
//! ## Example
//!
//! ```rust
//! use anomx_detector::{DetectorConfig, Explanation, SemiSupervisedDetector};
//! use anomx_core::FeatureMatrix;
//!
//! let mut detector = SemiSupervisedDetector::with_defaults(DetectorConfig::default()).unwrap();
//!
//! let train = FeatureMatrix::from_rows(&[
//!     vec![0.01, 0.02],
//!     vec![0.02, 0.01],
//!     vec![5.00, 4.80], // the outlier an analyst explained
//! ]).unwrap();
//! let seed = vec![Explanation::new("flash crash on thin liquidity", true)];
//! detector.fit(&train, Some(&seed)).unwrap();
//!
//! let labels = detector.predict(&train, None).unwrap();
//! assert_eq!(labels.len(), 3);
//! ```

pub mod config;
pub mod detector;
pub mod embedder;
pub mod scorer;
pub mod store;

pub use config::{
    DetectorConfig, DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_CONTAMINATION, DEFAULT_N_ESTIMATORS,
    DEFAULT_RANDOM_STATE,
};
pub use detector::SemiSupervisedDetector;
pub use embedder::{HashingEmbedder, TextEmbedder, DEFAULT_EMBEDDING_DIM};
pub use scorer::{DeviationEnsemble, OutlierScorer};
pub use store::{BestMatch, Explanation, ExplanationRecord, ExplanationStore};
