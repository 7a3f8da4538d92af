//! JSON file lease repository
//!
//! One pretty-printed JSON file per lease:
//!
//! ```text
//! <root>/drafts/<uuid>.json      LeaseRecord, overwritten on each save
//! <root>/documents/<uuid>.json   LeaseDocument, written once
//! ```
//!
//! Writes go to a temporary file that is then renamed over the target, so a
//! reader never sees a half-written record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use core_kernel::{DomainPort, LeaseId, PortError};
use domain_lease::{BuilderConfig, LeaseDocument, LeaseRecord, LeaseRepository};

use crate::error::StoreError;

const DRAFTS_DIR: &str = "drafts";
const DOCUMENTS_DIR: &str = "documents";

/// Lease repository backed by a directory of JSON files
#[derive(Debug)]
pub struct FileLeaseRepository {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLeaseRepository {
    /// Opens (creating if needed) a repository rooted at `root`
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        for dir in [DRAFTS_DIR, DOCUMENTS_DIR] {
            let path = root.join(dir);
            fs::create_dir_all(&path).map_err(|source| StoreError::RootUnavailable {
                path: path.clone(),
                source,
            })?;
        }
        info!(root = %root.display(), "Opened lease file repository");
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    /// Opens the repository at the configured draft directory
    pub fn from_config(config: &BuilderConfig) -> Result<Self, StoreError> {
        Self::open(&config.draft_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn draft_path(&self, id: LeaseId) -> PathBuf {
        self.root.join(DRAFTS_DIR).join(format!("{}.json", id.as_uuid()))
    }

    fn document_path(&self, id: LeaseId) -> PathBuf {
        self.root.join(DOCUMENTS_DIR).join(format!("{}.json", id.as_uuid()))
    }

    fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| StoreError::malformed(path, e))?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| StoreError::io(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "Could not remove temporary lease file");
            }
            return Err(StoreError::io(path, e));
        }
        debug!(path = %path.display(), "Wrote lease file");
        Ok(())
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
        let bytes = fs::read(path).map_err(|e| StoreError::io(path, e))?;
        serde_json::from_slice(&bytes).map_err(|e| StoreError::malformed(path, e))
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, PortError> {
        self.write_lock
            .lock()
            .map_err(|_| PortError::internal("lease file repository lock poisoned"))
    }
}

fn not_found_or(err: StoreError, entity: &str, id: LeaseId) -> PortError {
    if err.is_missing_file() {
        PortError::not_found(entity, id)
    } else {
        err.into()
    }
}

impl DomainPort for FileLeaseRepository {}

impl LeaseRepository for FileLeaseRepository {
    fn save_draft(&self, record: &LeaseRecord) -> Result<(), PortError> {
        let _guard = self.lock()?;
        self.write_json(&self.draft_path(record.id), record)?;
        Ok(())
    }

    fn load_draft(&self, id: LeaseId) -> Result<LeaseRecord, PortError> {
        Self::read_json(&self.draft_path(id)).map_err(|e| not_found_or(e, "LeaseDraft", id))
    }

    fn list_drafts(&self) -> Result<Vec<LeaseRecord>, PortError> {
        let dir = self.root.join(DRAFTS_DIR);
        let entries = fs::read_dir(&dir).map_err(|e| StoreError::io(&dir, e))?;

        let mut records = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| StoreError::io(&dir, e))?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            match Self::read_json::<LeaseRecord>(&path) {
                Ok(record) => records.push(record),
                // Removed between read_dir and read
                Err(e) if e.is_missing_file() => continue,
                Err(e) => return Err(e.into()),
            }
        }
        records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(records)
    }

    fn delete_draft(&self, id: LeaseId) -> Result<(), PortError> {
        let _guard = self.lock()?;
        let path = self.draft_path(id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(PortError::not_found("LeaseDraft", id)),
            Err(e) => Err(StoreError::io(&path, e).into()),
        }
    }

    fn save_document(&self, document: &LeaseDocument) -> Result<(), PortError> {
        let _guard = self.lock()?;
        let path = self.document_path(document.id);
        if path.exists() {
            warn!(lease_id = %document.id, "Refusing to overwrite finalized lease");
            return Err(StoreError::AlreadyFinalized(document.id.to_string()).into());
        }
        self.write_json(&path, document)?;
        info!(lease_id = %document.id, path = %path.display(), "Stored finalized lease");
        Ok(())
    }

    fn load_document(&self, id: LeaseId) -> Result<LeaseDocument, PortError> {
        Self::read_json(&self.document_path(id)).map_err(|e| not_found_or(e, "LeaseDocument", id))
    }
}
