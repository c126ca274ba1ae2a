//! Semi-supervised anomaly detector
//!
//! Fuses an unsupervised outlier scorer with similarity against a bank of
//! natural-language anomaly explanations. The numeric path always works;
//! the text path can only promote rows to "anomaly", never demote them,
//! and degrades to pass-through whenever the embedder is unavailable.

use crate::config::DetectorConfig;
use crate::embedder::{HashingEmbedder, TextEmbedder};
use crate::scorer::{DeviationEnsemble, OutlierScorer};
use crate::store::{Explanation, ExplanationRecord, ExplanationStore};
use anomx_core::{Error, FeatureMatrix, Label, Result};
use tracing::warn;

/// Anomaly detector combining a base outlier scorer with text-explanation
/// weak supervision.
///
/// Lifecycle: construct with hyperparameters, [`fit`](Self::fit) once (or
/// again to re-seed), then [`predict`](Self::predict) /
/// [`score_samples`](Self::score_samples) read-only, with
/// [`update_with_feedback`](Self::update_with_feedback) growing the
/// explanation store between predictions. The store is owned by this
/// instance and is never shared.
pub struct SemiSupervisedDetector<S, E> {
    config: DetectorConfig,
    scorer: S,
    embedder: E,
    store: ExplanationStore,
    fitted: bool,
}

impl SemiSupervisedDetector<DeviationEnsemble, HashingEmbedder> {
    /// Detector with the provided ensemble scorer and hashing embedder.
    pub fn with_defaults(config: DetectorConfig) -> Result<Self> {
        let scorer =
            DeviationEnsemble::new(config.contamination, config.n_estimators, config.random_state);
        Self::new(config, scorer, HashingEmbedder::default())
    }
}

impl<S: OutlierScorer, E: TextEmbedder> SemiSupervisedDetector<S, E> {
    /// Construct an unfitted detector. Fails on out-of-range configuration.
    pub fn new(config: DetectorConfig, scorer: S, embedder: E) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer,
            embedder,
            store: ExplanationStore::new(),
            fitted: false,
        })
    }

    /// Reassemble a detector from previously captured state, e.g. a loaded
    /// snapshot. The embedder is supplied fresh: it is stateless and its
    /// determinism guarantees stored embeddings stay comparable.
    pub fn from_parts(
        config: DetectorConfig,
        scorer: S,
        embedder: E,
        store: ExplanationStore,
        fitted: bool,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            scorer,
            embedder,
            store,
            fitted,
        })
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    #[inline]
    #[must_use]
    pub fn store(&self) -> &ExplanationStore {
        &self.store
    }

    #[inline]
    #[must_use]
    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    #[inline]
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        self.fitted
    }

    /// Fit the base scorer and optionally seed the explanation store.
    ///
    /// `explanations` is order-aligned to a caller-chosen subset of flagged
    /// training rows (often a sampled top-K), not to every row of `x`, so
    /// no row-alignment is enforced here. When text supervision is on and
    /// explanations are given, they replace any prior store content;
    /// entries with empty text are skipped to keep the store invariant.
    pub fn fit(&mut self, x: &FeatureMatrix, explanations: Option<&[Explanation]>) -> Result<()> {
        if x.is_empty() {
            return Err(Error::EmptyMatrix);
        }

        self.scorer.fit(x)?;
        self.fitted = true;

        if self.config.use_text_supervision {
            if let Some(exps) = explanations.filter(|e| !e.is_empty()) {
                match self.embed_explanations(exps) {
                    Ok(records) => self.store.replace(records),
                    Err(err) => {
                        warn!(error = %err, "explanation embedding failed; store left unseeded");
                    }
                }
            }
        }

        Ok(())
    }

    /// Label every row of `x`, fusing base predictions with the store.
    ///
    /// When `explanations` is given it must be row-aligned to `x`; a row
    /// with empty text keeps its base label. The text path can only flip
    /// "normal" to "anomaly": the argmax stored record must be anomalous,
    /// its similarity must strictly exceed the confidence threshold, and
    /// the row's own explanation must also assert anomaly.
    pub fn predict(
        &self,
        x: &FeatureMatrix,
        explanations: Option<&[Explanation]>,
    ) -> Result<Vec<Label>> {
        if !self.fitted {
            return Err(Error::NotFitted);
        }
        if x.is_empty() {
            return Err(Error::EmptyMatrix);
        }
        if let Some(exps) = explanations {
            if exps.len() != x.rows() {
                return Err(Error::RowCountMismatch {
                    rows: x.rows(),
                    aligned: exps.len(),
                });
            }
        }

        let mut labels = self.scorer.predict(x)?;

        let exps = match explanations {
            Some(e) if self.config.use_text_supervision => e,
            _ => return Ok(labels),
        };
        if self.store.is_empty() {
            return Ok(labels);
        }

        // One batch call for every non-empty text.
        let slots: Vec<usize> = (0..exps.len())
            .filter(|&i| !exps[i].text.is_empty())
            .collect();
        if slots.is_empty() {
            return Ok(labels);
        }
        let texts: Vec<&str> = slots.iter().map(|&i| exps[i].text.as_str()).collect();
        let embeddings = match self.embedder.encode_batch(&texts) {
            Ok(e) => e,
            Err(err) => {
                warn!(error = %err, "explanation embedding failed; returning base labels");
                return Ok(labels);
            }
        };

        for (&row, embedding) in slots.iter().zip(embeddings.iter()) {
            if labels[row].is_anomaly() || !exps[row].is_anomaly {
                continue;
            }
            if let Some(best) = self.store.best_match(embedding) {
                if best.is_anomaly && best.similarity > self.config.confidence_threshold {
                    labels[row] = Label::Anomaly;
                }
            }
        }

        Ok(labels)
    }

    /// Continuous anomaly score per row, larger = more anomalous.
    ///
    /// Pure numeric signal: the sign-flipped base decision function,
    /// unaffected by the explanation store.
    pub fn score_samples(&self, x: &FeatureMatrix) -> Result<Vec<f32>> {
        if !self.fitted {
            return Err(Error::NotFitted);
        }
        if x.is_empty() {
            return Err(Error::EmptyMatrix);
        }
        Ok(self
            .scorer
            .decision_function(x)?
            .into_iter()
            .map(|d| -d)
            .collect())
    }

    /// Grow the explanation store from human feedback.
    ///
    /// Only entries whose feedback is `true` and whose text is non-empty
    /// are embedded and appended; everything else is silently dropped.
    /// Never touches the base scorer.
    pub fn update_with_feedback(
        &mut self,
        x: &FeatureMatrix,
        explanations: &[Explanation],
        feedback: &[bool],
    ) -> Result<()> {
        if explanations.len() != x.rows() {
            return Err(Error::RowCountMismatch {
                rows: x.rows(),
                aligned: explanations.len(),
            });
        }
        if feedback.len() != explanations.len() {
            return Err(Error::RowCountMismatch {
                rows: explanations.len(),
                aligned: feedback.len(),
            });
        }
        if !self.config.use_text_supervision {
            return Ok(());
        }

        let confirmed: Vec<Explanation> = explanations
            .iter()
            .zip(feedback.iter())
            .filter(|(exp, &fb)| fb && !exp.text.is_empty())
            .map(|(exp, _)| exp.clone())
            .collect();
        if confirmed.is_empty() {
            return Ok(());
        }

        match self.embed_explanations(&confirmed) {
            Ok(records) => self.store.append(records),
            Err(err) => {
                warn!(error = %err, "feedback embedding failed; store left unchanged");
            }
        }
        Ok(())
    }

    /// Embed every non-empty explanation in one batch call.
    fn embed_explanations(&self, explanations: &[Explanation]) -> Result<Vec<ExplanationRecord>> {
        let kept: Vec<&Explanation> = explanations
            .iter()
            .filter(|e| !e.text.is_empty())
            .collect();
        let texts: Vec<&str> = kept.iter().map(|e| e.text.as_str()).collect();
        let embeddings = self.embedder.encode_batch(&texts)?;

        Ok(kept
            .into_iter()
            .zip(embeddings)
            .map(|(exp, embedding)| ExplanationRecord {
                text: exp.text.clone(),
                is_anomaly: exp.is_anomaly,
                embedding,
            })
            .collect())
    }
}
