//! Local draft cache — durable storage for in-progress documents.
//!
//! One JSON file per draft key under a configured directory. Writes go
//! through a temp file in the same directory followed by a rename, so a
//! crash mid-write leaves the previous draft intact. Last write wins;
//! there is no cross-process locking and no transactional guarantee
//! beyond the rename.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::document::{DocumentKind, RawFields};

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("draft store io failure: {0}")]
    Io(#[from] io::Error),

    #[error("draft could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid draft key '{0}'")]
    InvalidKey(String),

    #[error("no platform data directory available")]
    NoDataDir,
}

/// Everything needed to resume an abandoned session: which kind of
/// document, the chosen template, the field map, and when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    pub kind: DocumentKind,
    pub template_id: String,
    pub saved_at: DateTime<Utc>,
    pub fields: RawFields,
}

/// Key-value draft store over a directory of JSON files.
#[derive(Debug, Clone)]
pub struct DraftCache {
    dir: PathBuf,
}

impl DraftCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DraftCache { dir: dir.into() }
    }

    /// Cache under the platform data directory (`<data>/builder/drafts`).
    pub fn open_default() -> Result<Self, CacheError> {
        let base = dirs::data_dir().ok_or(CacheError::NoDataDir)?;
        Ok(DraftCache::new(base.join("builder").join("drafts")))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes the draft for `key`, replacing any previous draft atomically.
    pub fn save(&self, key: &str, draft: &DraftRecord) -> Result<(), CacheError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let bytes = serde_json::to_vec_pretty(draft)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, &path)?;

        info!("saved draft '{key}' ({} bytes)", bytes.len());
        Ok(())
    }

    /// Reads the draft for `key`; `Ok(None)` when none has been saved.
    pub fn load(&self, key: &str) -> Result<Option<DraftRecord>, CacheError> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!("no draft for '{key}'");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };
        let draft = serde_json::from_slice(&bytes)?;
        info!("loaded draft '{key}'");
        Ok(Some(draft))
    }

    /// Deletes the draft for `key`; returns whether one existed.
    pub fn remove(&self, key: &str) -> Result<bool, CacheError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("removed draft '{key}'");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Maps a key to its file. Keys are restricted to a filename-safe
    /// alphabet so they can never name a path outside the cache directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, CacheError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(CacheError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}
