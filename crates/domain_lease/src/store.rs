//! The lease draft store
//!
//! Single source of truth for the wizard: the lease being built, the current
//! step and the lifecycle status. The store is an ordinary value owned by its
//! caller; its template catalog and repository are injected.
//!
//! # Transitions
//!
//! - [`next_step`](LeaseDraftStore::next_step) only accepts a
//!   [`ValidatedStep`] minted for the current step, applies the step's change
//!   and moves forward
//! - [`prev_step`](LeaseDraftStore::prev_step) moves back without validation
//! - [`save_draft`](LeaseDraftStore::save_draft) persists without validation
//!   and marks the lease `Draft`; any later change returns it to `Building`
//! - [`finalize`](LeaseDraftStore::finalize) re-validates, stores the
//!   assembled document and resets the builder

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use core_kernel::{LeaseId, TemplateId};
use domain_catalog::{LeaseTemplate, TemplateCatalog};

use crate::document::{LeaseDocument, LeaseRecord};
use crate::draft::{LeaseDraft, LeasePatch};
use crate::error::LeaseError;
use crate::events::LeaseEvent;
use crate::repository::LeaseRepository;
use crate::status::{LeaseStatus, WizardStep};
use crate::steps::{StepCommit, ValidatedStep};
use crate::validation::validate_draft;

pub struct LeaseDraftStore {
    lease_id: LeaseId,
    lease: LeaseDraft,
    current_step: WizardStep,
    status: LeaseStatus,
    last_saved_at: Option<DateTime<Utc>>,
    templates: Arc<dyn TemplateCatalog>,
    repository: Arc<dyn LeaseRepository>,
    events: Vec<LeaseEvent>,
}

impl fmt::Debug for LeaseDraftStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeaseDraftStore")
            .field("lease_id", &self.lease_id)
            .field("current_step", &self.current_step)
            .field("status", &self.status)
            .field("lease", &self.lease)
            .finish_non_exhaustive()
    }
}

impl LeaseDraftStore {
    /// Creates an empty store at the first step
    pub fn new(templates: Arc<dyn TemplateCatalog>, repository: Arc<dyn LeaseRepository>) -> Self {
        Self {
            lease_id: LeaseId::new(),
            lease: LeaseDraft::default(),
            current_step: WizardStep::FIRST,
            status: LeaseStatus::default(),
            last_saved_at: None,
            templates,
            repository,
            events: Vec::new(),
        }
    }

    /// Rebuilds a store from a saved draft
    ///
    /// # Errors
    ///
    /// Returns `LeaseError::NotModifiable` if the record is not an editable
    /// draft.
    pub fn resume(
        record: LeaseRecord,
        templates: Arc<dyn TemplateCatalog>,
        repository: Arc<dyn LeaseRepository>,
    ) -> Result<Self, LeaseError> {
        if !record.status.is_editable() {
            return Err(LeaseError::NotModifiable(record.status.to_string()));
        }
        tracing::info!(lease_id = %record.id, step = %record.current_step, "Resuming lease draft");
        Ok(Self {
            lease_id: record.id,
            lease: record.draft,
            current_step: record.current_step,
            status: LeaseStatus::Draft,
            last_saved_at: Some(record.saved_at),
            templates,
            repository,
            events: Vec::new(),
        })
    }

    pub fn lease_id(&self) -> LeaseId {
        self.lease_id
    }

    pub fn lease(&self) -> &LeaseDraft {
        &self.lease
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn status(&self) -> LeaseStatus {
        self.status
    }

    pub fn template_id(&self) -> Option<&TemplateId> {
        self.lease.template_id.as_ref()
    }

    /// Resolves the selected template through the catalog
    pub fn current_template(&self) -> Option<LeaseTemplate> {
        self.templates.lookup_template(self.template_id()?)
    }

    pub fn templates(&self) -> &Arc<dyn TemplateCatalog> {
        &self.templates
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.last_saved_at
    }

    /// Returns accumulated domain events and clears them
    pub fn take_events(&mut self) -> Vec<LeaseEvent> {
        std::mem::take(&mut self.events)
    }

    /// Selects a template and seeds the lease type and required clauses
    ///
    /// Returns `None` and leaves the lease untouched if the id does not
    /// resolve. Choosing a different template resets the clause selection to
    /// its required clauses; choosing the same one again keeps any optional
    /// clauses already picked.
    pub fn set_template(&mut self, id: &TemplateId) -> Option<LeaseTemplate> {
        let Some(template) = self.templates.lookup_template(id) else {
            tracing::warn!(lease_id = %self.lease_id, template_id = %id, "Template not found, selection ignored");
            return None;
        };

        let required = template.required_clause_ids();
        if self.lease.template_id.as_ref() == Some(&template.id) {
            self.lease.selected_clauses.extend(required);
        } else {
            self.lease.selected_clauses = required;
        }
        self.lease.template_id = Some(template.id.clone());
        self.lease.lease_type = Some(template.lease_type);
        self.mark_building();

        tracing::info!(
            lease_id = %self.lease_id,
            template_id = %template.id,
            clauses = self.lease.selected_clauses.len(),
            "Template selected"
        );
        self.events.push(LeaseEvent::TemplateSelected {
            lease_id: self.lease_id,
            template_id: template.id.clone(),
            timestamp: Utc::now(),
        });

        Some(template)
    }

    /// Shallow-merges a patch into the lease without validation
    pub fn update_lease(&mut self, patch: LeasePatch) {
        if patch.is_empty() {
            return;
        }
        tracing::debug!(lease_id = %self.lease_id, keys = ?patch.keys(), "Merging lease patch");
        self.lease.apply(patch);
        self.mark_building();
    }

    /// Applies a confirmed step and advances, clamped at the last step
    ///
    /// # Errors
    ///
    /// - `LeaseError::StepMismatch` if the proof was minted for another step
    /// - `LeaseError::TemplateNotFound` if a template commit no longer resolves
    pub fn next_step(&mut self, validated: ValidatedStep) -> Result<WizardStep, LeaseError> {
        if validated.step() != self.current_step {
            tracing::warn!(
                lease_id = %self.lease_id,
                expected = %self.current_step,
                actual = %validated.step(),
                "Rejected step proof"
            );
            return Err(LeaseError::StepMismatch {
                expected: self.current_step,
                actual: validated.step(),
            });
        }

        match validated.into_commit() {
            StepCommit::Template(id) => {
                if self.set_template(&id).is_none() {
                    return Err(LeaseError::TemplateNotFound(id.to_string()));
                }
            }
            StepCommit::Merge(patch) => self.update_lease(patch),
        }

        let from = self.current_step;
        let to = from.next();
        if to != from {
            self.current_step = to;
            self.status = LeaseStatus::Building { step: to };
            tracing::info!(lease_id = %self.lease_id, from = %from, to = %to, "Step advanced");
            self.events.push(LeaseEvent::StepAdvanced {
                lease_id: self.lease_id,
                from,
                to,
                timestamp: Utc::now(),
            });
        }
        Ok(self.current_step)
    }

    /// Moves back one step, clamped at the first step
    ///
    /// Going back changes nothing in the lease, so a saved draft stays
    /// `Draft`.
    pub fn prev_step(&mut self) -> WizardStep {
        let from = self.current_step;
        let to = from.prev();
        if to != from {
            self.current_step = to;
            if let LeaseStatus::Building { .. } = self.status {
                self.status = LeaseStatus::Building { step: to };
            }
            tracing::debug!(lease_id = %self.lease_id, from = %from, to = %to, "Step reverted");
            self.events.push(LeaseEvent::StepReverted {
                lease_id: self.lease_id,
                from,
                to,
                timestamp: Utc::now(),
            });
        }
        self.current_step
    }

    /// Persists the lease as an editable draft, without validation
    pub fn save_draft(&mut self) -> Result<LeaseRecord, LeaseError> {
        let saved_at = Utc::now();
        let record = LeaseRecord {
            id: self.lease_id,
            status: LeaseStatus::Draft,
            current_step: self.current_step,
            draft: self.lease.clone(),
            saved_at,
        };
        self.repository.save_draft(&record)?;

        self.status = LeaseStatus::Draft;
        self.last_saved_at = Some(saved_at);
        tracing::info!(lease_id = %self.lease_id, step = %self.current_step, "Lease draft saved");
        self.events.push(LeaseEvent::DraftSaved {
            lease_id: self.lease_id,
            step: self.current_step,
            timestamp: saved_at,
        });
        Ok(record)
    }

    /// Re-validates the lease, stores the finalized document and resets
    ///
    /// On any error the lease is left as it was so the user can fix it or
    /// retry.
    ///
    /// # Errors
    ///
    /// - `LeaseError::Incomplete` listing every failing field
    /// - `LeaseError::TemplateNotFound` if the template no longer resolves
    /// - `LeaseError::Repository` if the document could not be stored
    pub fn finalize(&mut self) -> Result<LeaseDocument, LeaseError> {
        let result = validate_draft(&self.lease);
        if !result.is_valid() {
            tracing::warn!(
                lease_id = %self.lease_id,
                errors = result.errors().len(),
                "Finalize rejected, lease incomplete"
            );
            return Err(LeaseError::Incomplete {
                errors: result.into_errors(),
            });
        }

        let template = self
            .current_template()
            .ok_or_else(|| LeaseError::TemplateNotFound(self.template_label()))?;
        let document = LeaseDocument::assemble(self.lease_id, &self.lease, &template, Utc::now())?;
        self.repository.save_document(&document)?;

        if self.last_saved_at.is_some() {
            match self.repository.delete_draft(self.lease_id) {
                Ok(()) => {}
                Err(e) if e.is_not_found() => {}
                Err(e) => tracing::warn!(lease_id = %self.lease_id, error = %e, "Could not remove finalized draft"),
            }
        }

        tracing::info!(lease_id = %self.lease_id, template_id = %document.template_id, "Lease finalized");
        self.events.push(LeaseEvent::LeaseFinalized {
            lease_id: self.lease_id,
            template_id: document.template_id.clone(),
            timestamp: document.finalized_at,
        });
        self.reset_builder();
        Ok(document)
    }

    /// Clears the lease and returns to the first step under a fresh id
    pub fn reset_builder(&mut self) {
        let previous = self.lease_id;
        self.lease = LeaseDraft::default();
        self.current_step = WizardStep::FIRST;
        self.status = LeaseStatus::default();
        self.last_saved_at = None;
        self.lease_id = LeaseId::new();

        tracing::info!(lease_id = %previous, "Lease builder reset");
        self.events.push(LeaseEvent::BuilderReset {
            lease_id: previous,
            timestamp: Utc::now(),
        });
    }

    fn mark_building(&mut self) {
        self.status = LeaseStatus::Building {
            step: self.current_step,
        };
    }

    fn template_label(&self) -> String {
        self.template_id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "none selected".to_string())
    }
}
