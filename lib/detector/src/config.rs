//! Detector configuration
//!
//! Hyperparameters are fixed at construction time and validated once; the
//! detector never mutates them afterwards.

use anomx_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Expected fraction of anomalous rows in the training window.
pub const DEFAULT_CONTAMINATION: f32 = 0.05;

/// Ensemble size for the base outlier scorer.
pub const DEFAULT_N_ESTIMATORS: usize = 100;

/// Minimum text similarity required before a stored explanation can
/// override a "normal" verdict.
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Seed for reproducible scorer fits.
pub const DEFAULT_RANDOM_STATE: u64 = 42;

/// Configuration for a [`SemiSupervisedDetector`](crate::SemiSupervisedDetector).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectorConfig {
    /// Expected proportion of outliers, in the open interval (0, 1).
    /// Passed through to the base scorer.
    pub contamination: f32,

    /// Base scorer ensemble size.
    pub n_estimators: usize,

    /// Seed for the base scorer's subsampling.
    pub random_state: u64,

    /// Text-similarity score in [0, 1] that a stored explanation must
    /// strictly exceed to override the base scorer's "normal" verdict.
    pub confidence_threshold: f32,

    /// When false the text path is fully bypassed and the detector behaves
    /// identically to the bare base scorer.
    pub use_text_supervision: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            n_estimators: DEFAULT_N_ESTIMATORS,
            random_state: DEFAULT_RANDOM_STATE,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            use_text_supervision: true,
        }
    }
}

impl DetectorConfig {
    /// Check ranges. Called once when the detector is constructed.
    pub fn validate(&self) -> Result<()> {
        if !(self.contamination > 0.0 && self.contamination < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "contamination must be in (0, 1), got {}",
                self.contamination
            )));
        }
        if self.n_estimators == 0 {
            return Err(Error::InvalidConfig(
                "n_estimators must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(Error::InvalidConfig(format!(
                "confidence_threshold must be in [0, 1], got {}",
                self.confidence_threshold
            )));
        }
        Ok(())
    }
}
