//! # anomx Storage
//!
//! Persistence and caching for anomx detectors:
//!
//! - [`SnapshotManager`] / [`DetectorSnapshot`] - checksummed, atomically
//!   written detector state that round-trips losslessly
//! - [`ResultCache`] - explicit, caller-owned cache of detection results
//!   keyed by a content fingerprint of the feature window

pub mod cache;
pub mod snapshot;

pub use cache::{window_fingerprint, CachedResult, ResultCache};
pub use snapshot::{DetectorSnapshot, SnapshotManager};
