//! Lease persistence port
//!
//! The store only ever writes through [`LeaseRepository`]. Adapters decide
//! where records live: [`InMemoryLeaseRepository`] keeps them in process,
//! the `infra_store` crate writes JSON files.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use domain_lease::repository::{InMemoryLeaseRepository, LeaseRepository};
//!
//! let repository: Arc<dyn LeaseRepository> = Arc::new(InMemoryLeaseRepository::new());
//! let store = LeaseDraftStore::new(templates, repository);
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use core_kernel::{DomainPort, LeaseId, PortError};

use crate::document::{LeaseDocument, LeaseRecord};

/// Storage for saved drafts and finalized documents
pub trait LeaseRepository: DomainPort {
    /// Inserts or replaces the draft with the record's id
    fn save_draft(&self, record: &LeaseRecord) -> Result<(), PortError>;

    /// Loads a saved draft
    ///
    /// Returns `PortError::NotFound` if no draft exists for `id`.
    fn load_draft(&self, id: LeaseId) -> Result<LeaseRecord, PortError>;

    /// Lists saved drafts, most recently saved first
    fn list_drafts(&self) -> Result<Vec<LeaseRecord>, PortError>;

    /// Removes a draft; `PortError::NotFound` if absent
    fn delete_draft(&self, id: LeaseId) -> Result<(), PortError>;

    /// Stores a finalized document
    ///
    /// Returns `PortError::Conflict` if a document with the same id exists:
    /// finalized leases are immutable.
    fn save_document(&self, document: &LeaseDocument) -> Result<(), PortError>;

    fn load_document(&self, id: LeaseId) -> Result<LeaseDocument, PortError>;
}

/// Process-local repository
#[derive(Debug, Default)]
pub struct InMemoryLeaseRepository {
    drafts: RwLock<HashMap<LeaseId, LeaseRecord>>,
    documents: RwLock<HashMap<LeaseId, LeaseDocument>>,
}

impl InMemoryLeaseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub fn document_count(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }
}

fn poisoned<T>(_: T) -> PortError {
    PortError::internal("lease repository lock poisoned")
}

impl DomainPort for InMemoryLeaseRepository {}

impl LeaseRepository for InMemoryLeaseRepository {
    fn save_draft(&self, record: &LeaseRecord) -> Result<(), PortError> {
        let mut drafts = self.drafts.write().map_err(poisoned)?;
        drafts.insert(record.id, record.clone());
        Ok(())
    }

    fn load_draft(&self, id: LeaseId) -> Result<LeaseRecord, PortError> {
        let drafts = self.drafts.read().map_err(poisoned)?;
        drafts
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("LeaseDraft", id))
    }

    fn list_drafts(&self) -> Result<Vec<LeaseRecord>, PortError> {
        let drafts = self.drafts.read().map_err(poisoned)?;
        let mut records: Vec<LeaseRecord> = drafts.values().cloned().collect();
        records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
        Ok(records)
    }

    fn delete_draft(&self, id: LeaseId) -> Result<(), PortError> {
        let mut drafts = self.drafts.write().map_err(poisoned)?;
        drafts
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| PortError::not_found("LeaseDraft", id))
    }

    fn save_document(&self, document: &LeaseDocument) -> Result<(), PortError> {
        let mut documents = self.documents.write().map_err(poisoned)?;
        if documents.contains_key(&document.id) {
            return Err(PortError::conflict(format!(
                "lease {} is already finalized",
                document.id
            )));
        }
        documents.insert(document.id, document.clone());
        Ok(())
    }

    fn load_document(&self, id: LeaseId) -> Result<LeaseDocument, PortError> {
        let documents = self.documents.read().map_err(poisoned)?;
        documents
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("LeaseDocument", id))
    }
}
