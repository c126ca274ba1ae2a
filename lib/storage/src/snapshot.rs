//! Detector snapshots
//!
//! Serializes the parts of detector state that must survive a process
//! restart: configuration, the fitted scorer and the explanation store
//! with its cached embeddings. The embedder is deliberately absent - it is
//! stateless and deterministic, so a fresh instance reproduces every
//! stored embedding bit for bit.

use anomx_detector::{
    DetectorConfig, ExplanationRecord, ExplanationStore, OutlierScorer, SemiSupervisedDetector,
    TextEmbedder,
};
use anyhow::{anyhow, Result};
use atomicwrites::{AllowOverwrite, AtomicFile};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

const SNAPSHOT_EXT: &str = "snapshot";

/// Serializable detector state, captured from and restored into a
/// [`SemiSupervisedDetector`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorSnapshot<S> {
    pub config: DetectorConfig,
    pub scorer: S,
    pub records: Vec<ExplanationRecord>,
    pub fitted: bool,
    pub created_at: DateTime<Utc>,
}

impl<S> DetectorSnapshot<S> {
    /// Capture the persistable state of a detector.
    pub fn capture<E>(detector: &SemiSupervisedDetector<S, E>) -> Self
    where
        S: OutlierScorer + Clone,
        E: TextEmbedder,
    {
        Self {
            config: detector.config().clone(),
            scorer: detector.scorer().clone(),
            records: detector.store().records().to_vec(),
            fitted: detector.is_fitted(),
            created_at: Utc::now(),
        }
    }

    /// Rebuild a detector, supplying the embedder anew.
    pub fn restore<E>(self, embedder: E) -> anomx_core::Result<SemiSupervisedDetector<S, E>>
    where
        S: OutlierScorer,
        E: TextEmbedder,
    {
        SemiSupervisedDetector::from_parts(
            self.config,
            self.scorer,
            embedder,
            ExplanationStore::from_records(self.records),
            self.fitted,
        )
    }
}

/// On-disk wrapper: payload plus integrity checksum.
#[derive(Serialize, Deserialize)]
struct SnapshotFile {
    checksum: String,
    payload: Vec<u8>,
}

/// Writes and reads named snapshots under one directory.
///
/// Files are written atomically (write-to-temp plus rename) so a crash
/// mid-save never corrupts the previous snapshot, and verified against a
/// SHA-256 checksum on load.
pub struct SnapshotManager {
    snapshot_dir: PathBuf,
}

impl SnapshotManager {
    pub fn new<P: AsRef<Path>>(snapshot_dir: P) -> Result<Self> {
        let snapshot_dir = snapshot_dir.as_ref().to_path_buf();
        fs::create_dir_all(&snapshot_dir)?;
        Ok(Self { snapshot_dir })
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.snapshot_dir.join(format!("{name}.{SNAPSHOT_EXT}"))
    }

    /// Persist a snapshot under `name`, replacing any previous one.
    pub fn save<S: Serialize>(&self, name: &str, snapshot: &DetectorSnapshot<S>) -> Result<PathBuf> {
        let payload = bincode::serialize(snapshot)
            .map_err(|e| anyhow!("Serialization error: {e}"))?;
        let file = SnapshotFile {
            checksum: format!("{:x}", Sha256::digest(&payload)),
            payload,
        };
        let bytes = bincode::serialize(&file)
            .map_err(|e| anyhow!("Serialization error: {e}"))?;

        let path = self.path_for(name);
        AtomicFile::new(&path, AllowOverwrite).write(|f| f.write_all(&bytes))?;
        Ok(path)
    }

    /// Load a named snapshot. `Ok(None)` when it does not exist; an error
    /// when the file is unreadable or fails its checksum.
    pub fn load<S: DeserializeOwned>(&self, name: &str) -> Result<Option<DetectorSnapshot<S>>> {
        let path = self.path_for(name);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let file: SnapshotFile = bincode::deserialize(&bytes)
            .map_err(|e| anyhow!("Deserialization error: {e}"))?;

        let checksum = format!("{:x}", Sha256::digest(&file.payload));
        if checksum != file.checksum {
            return Err(anyhow!(
                "Snapshot checksum mismatch for {name}: expected {}, got {checksum}",
                file.checksum
            ));
        }

        let snapshot = bincode::deserialize(&file.payload)
            .map_err(|e| anyhow!("Deserialization error: {e}"))?;
        Ok(Some(snapshot))
    }

    /// Names of all snapshots in the directory.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.snapshot_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some(SNAPSHOT_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
