//! Sample storage with a rolling retention window.
//!
//! The store is one JSON file holding the full retained sequence,
//! rewritten on every update. Writes go through a temp file in the same
//! directory and a rename, so a concurrent reader observes either the
//! previous or the new complete file, never a torn write. A missing or
//! corrupt file is equivalent to an empty dataset.

use crate::error::{PricewatchError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Maximum age of retained samples (6 hours).
pub const RETENTION_SECS: i64 = 21_600;

/// A single price observation. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp (seconds).
    pub time: i64,
    /// Price scaled to 0-100.
    pub price: f64,
}

/// File-backed, size/time-bounded sample sequence.
#[derive(Debug, Clone)]
pub struct SampleStore {
    path: PathBuf,
}

impl SampleStore {
    /// Create a store backed by the given file. The file is not touched
    /// until the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the retained sequence.
    ///
    /// A missing, unreadable, or corrupt file yields an empty sequence;
    /// this never fails.
    pub fn load(&self) -> Vec<Sample> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return Vec::new(),
        };

        match serde_json::from_str(&raw) {
            Ok(samples) => samples,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Sample file corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace the stored sequence atomically.
    pub fn save(&self, samples: &[Sample]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)
            .map_err(|e| PricewatchError::IoError { path: dir.to_path_buf(), source: e })?;

        let json = serde_json::to_string(samples)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .map_err(|e| PricewatchError::IoError { path: dir.to_path_buf(), source: e })?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| PricewatchError::IoError { path: self.path.clone(), source: e })?;
        tmp.persist(&self.path)
            .map_err(|e| PricewatchError::IoError { path: self.path.clone(), source: e.error })?;

        Ok(())
    }

    /// Append one sample and drop everything older than the retention
    /// window. The only mutating operation on the store.
    pub fn append_and_prune(&self, price: f64, now: i64) -> Result<Vec<Sample>> {
        let mut samples = self.load();
        samples.push(Sample { time: now, price });

        let cutoff = now - RETENTION_SECS;
        samples.retain(|s| s.time >= cutoff);

        self.save(&samples)?;
        debug!(retained = samples.len(), "Sample store updated");
        Ok(samples)
    }
}
