//! File-backed session store with per-key locking and atomic writes.

use crate::error::{HistoryError, Result};
use crate::filename;
use consentry_core::{ScanSession, SessionSummary};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Durable CRUD over [`ScanSession`] records, one JSON file per session.
pub struct HistoryStore {
    dir: PathBuf,
    /// Per-filename locks serializing save/get/delete on the same record.
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl HistoryStore {
    /// Open a store rooted at `dir`, creating the directory if absent.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "history store opened");

        Ok(Self {
            dir,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Directory the store writes into.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Persist a session and return its generated filename.
    ///
    /// The record is written to a temporary file in the store directory
    /// and renamed into place, so concurrent readers never observe a
    /// partially written record. Write failures surface to the caller and
    /// are not retried.
    pub async fn save(&self, session: &ScanSession) -> Result<String> {
        let name = filename::session_filename(session);
        let bytes = serde_json::to_vec_pretty(session)?;

        let lock = self.lock_for(&name).await;
        let _guard = lock.lock().await;

        let tmp_path = self.dir.join(format!(".{name}.tmp"));
        let final_path = self.dir.join(&name);

        fs::write(&tmp_path, &bytes).await?;
        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            // Leave nothing half-visible if the rename itself failed.
            let _ = fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }

        info!(filename = %name, results = session.results.len(), "scan session saved");
        Ok(name)
    }

    /// Summarize all stored sessions, newest first.
    ///
    /// Records that fail to read or parse are skipped with a warning;
    /// one corrupt record never fails the whole listing.
    pub async fn list(&self) -> Result<Vec<SessionSummary>> {
        let mut summaries = Vec::new();
        let mut entries = fs::read_dir(&self.dir).await?;

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.ends_with(".json") {
                continue;
            }

            let bytes = match fs::read(entry.path()).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(filename = %name, error = %e, "skipping unreadable history record");
                    continue;
                }
            };

            match serde_json::from_slice::<ScanSession>(&bytes) {
                Ok(session) => summaries.push(SessionSummary::of(name, &session)),
                Err(e) => {
                    warn!(filename = %name, error = %e, "skipping corrupt history record");
                }
            }
        }

        summaries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(summaries)
    }

    /// Load the full session stored under `filename`.
    pub async fn get(&self, filename: &str) -> Result<ScanSession> {
        filename::validate(filename)?;

        let lock = self.lock_for(filename).await;
        let _guard = lock.lock().await;

        let bytes = match fs::read(self.dir.join(filename)).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(HistoryError::NotFound {
                    filename: filename.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map_err(|e| HistoryError::Corrupt {
            filename: filename.to_string(),
            reason: e.to_string(),
        })
    }

    /// Remove the record stored under `filename`. Irrevocable.
    pub async fn delete(&self, filename: &str) -> Result<()> {
        filename::validate(filename)?;

        let lock = self.lock_for(filename).await;
        let _guard = lock.lock().await;

        match fs::remove_file(self.dir.join(filename)).await {
            Ok(()) => {
                info!(filename, "history record deleted");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Err(HistoryError::NotFound {
                filename: filename.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn lock_for(&self, filename: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(filename.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
