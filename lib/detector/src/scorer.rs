//! Base outlier scorer
//!
//! The detector treats the unsupervised scorer as a swappable capability:
//! anything that can fit on a feature matrix, emit binary labels and expose
//! a decision function. [`DeviationEnsemble`] is the provided
//! implementation; callers with their own model implement [`OutlierScorer`].

use anomx_core::{Error, FeatureMatrix, Label, Result};
use ordered_float::OrderedFloat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Fraction of training rows each ensemble member is fitted on.
const MAX_SAMPLES: f32 = 0.8;

/// Floor for per-feature spread so constant features never divide by zero.
const MIN_SPREAD: f32 = 1e-6;

/// Capability contract for an unsupervised outlier model.
///
/// The decision function follows the usual convention: higher means more
/// normal, negative means anomalous. The detector sign-flips it for its
/// own `score_samples`, where larger is more anomalous.
pub trait OutlierScorer {
    /// Fit the model on a training matrix.
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()>;

    /// Binary label per row.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>>;

    /// Continuous decision score per row (higher = more normal).
    fn decision_function(&self, x: &FeatureMatrix) -> Result<Vec<f32>>;
}

/// Per-member location/scale statistics over a bootstrap sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Member {
    means: Vec<f32>,
    spreads: Vec<f32>,
}

impl Member {
    /// Mean absolute standardized deviation of one row.
    fn score_row(&self, row: &[f32]) -> f32 {
        let d = self.means.len();
        let mut total = 0.0f32;
        for j in 0..d {
            total += (row[j] - self.means[j]).abs() / self.spreads[j];
        }
        total / d as f32
    }
}

/// Bootstrap ensemble of per-feature deviation models.
///
/// Each of `n_estimators` members fits per-feature mean and spread on a
/// bootstrap subsample of the training rows; a row's raw score is the
/// ensemble average of its standardized deviations. The anomaly cutoff is
/// the `(1 - contamination)` quantile of the training scores, so roughly
/// the expected fraction of training rows lands above it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviationEnsemble {
    contamination: f32,
    n_estimators: usize,
    random_state: u64,
    members: Vec<Member>,
    offset: f32,
}

impl DeviationEnsemble {
    pub fn new(contamination: f32, n_estimators: usize, random_state: u64) -> Self {
        Self {
            contamination,
            n_estimators,
            random_state,
            members: Vec::new(),
            offset: 0.0,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.members.is_empty()
    }

    fn check_fitted(&self, x: &FeatureMatrix) -> Result<()> {
        let member = self.members.first().ok_or(Error::NotFitted)?;
        if member.means.len() != x.cols() {
            return Err(Error::InvalidDimension {
                expected: member.means.len(),
                actual: x.cols(),
            });
        }
        Ok(())
    }

    /// Ensemble-average deviation score per row (higher = more anomalous).
    fn raw_scores(&self, x: &FeatureMatrix) -> Vec<f32> {
        x.iter_rows()
            .map(|row| {
                let sum: f32 = self.members.iter().map(|m| m.score_row(row)).sum();
                sum / self.members.len() as f32
            })
            .collect()
    }

    fn fit_member(x: &FeatureMatrix, seed: u64) -> Member {
        let rows = x.rows();
        let cols = x.cols();
        let sample_size = ((rows as f32 * MAX_SAMPLES) as usize).max(1);

        let mut rng = StdRng::seed_from_u64(seed);
        let sample: Vec<usize> = (0..sample_size).map(|_| rng.random_range(0..rows)).collect();

        let mut means = vec![0.0f32; cols];
        for &i in &sample {
            for (j, v) in x.row(i).iter().enumerate() {
                means[j] += v;
            }
        }
        for m in &mut means {
            *m /= sample_size as f32;
        }

        let mut spreads = vec![0.0f32; cols];
        for &i in &sample {
            for (j, v) in x.row(i).iter().enumerate() {
                let d = v - means[j];
                spreads[j] += d * d;
            }
        }
        for s in &mut spreads {
            *s = (*s / sample_size as f32).sqrt().max(MIN_SPREAD);
        }

        Member { means, spreads }
    }
}

impl OutlierScorer for DeviationEnsemble {
    fn fit(&mut self, x: &FeatureMatrix) -> Result<()> {
        if x.is_empty() {
            return Err(Error::EmptyMatrix);
        }

        let base_seed = self.random_state;
        self.members = (0..self.n_estimators)
            .into_par_iter()
            .map(|i| Self::fit_member(x, base_seed.wrapping_add(i as u64)))
            .collect();

        // Cutoff at the (1 - contamination) quantile of training scores.
        let mut scores = self.raw_scores(x);
        scores.sort_by_key(|s| OrderedFloat(*s));
        let idx = ((1.0 - self.contamination) * (scores.len() - 1) as f32).round() as usize;
        self.offset = scores[idx.min(scores.len() - 1)];

        Ok(())
    }

    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Label>> {
        self.check_fitted(x)?;
        Ok(self
            .raw_scores(x)
            .into_iter()
            .map(|s| {
                if s > self.offset {
                    Label::Anomaly
                } else {
                    Label::Normal
                }
            })
            .collect())
    }

    fn decision_function(&self, x: &FeatureMatrix) -> Result<Vec<f32>> {
        self.check_fitted(x)?;
        Ok(self.raw_scores(x).into_iter().map(|s| self.offset - s).collect())
    }
}
