//! Step controller
//!
//! Drives the wizard on top of a [`LeaseDraftStore`]: it seeds the form for
//! the current step from the lease, forwards confirmed forms to the store and
//! guards finalize with a fresh occupancy check.
//!
//! ```rust,ignore
//! let mut wizard = StepController::new(config, landlord, templates, properties, repository);
//!
//! if let StepView::Template(mut form) = wizard.active_form() {
//!     form.select(&TemplateId::from("residential-standard"));
//!     wizard.confirm(form)?;
//! }
//! ```

use std::sync::Arc;

use core_kernel::{LeaseId, PropertyId};
use domain_catalog::{PropertyCatalog, TemplateCatalog, Unit};

use crate::config::BuilderConfig;
use crate::document::{LeaseDocument, LeaseRecord, ReviewSummary};
use crate::error::LeaseError;
use crate::events::LeaseEvent;
use crate::repository::LeaseRepository;
use crate::status::{LeaseStatus, WizardStep};
use crate::steps::{
    AdditionalTermsForm, CustomClausesForm, LandlordContext, PropertyForm, StepForm, TemplateForm,
    TenantForm, TermsForm,
};
use crate::store::LeaseDraftStore;

/// The seeded form (or summary) for the current step
#[derive(Debug, Clone, PartialEq)]
pub enum StepView {
    Template(TemplateForm),
    Property(PropertyForm),
    Tenant(TenantForm),
    Terms(TermsForm),
    AdditionalTerms(AdditionalTermsForm),
    CustomClauses(CustomClausesForm),
    Review(ReviewSummary),
}

impl StepView {
    pub fn step(&self) -> WizardStep {
        match self {
            StepView::Template(_) => WizardStep::Template,
            StepView::Property(_) => WizardStep::Property,
            StepView::Tenant(_) => WizardStep::Tenant,
            StepView::Terms(_) => WizardStep::Terms,
            StepView::AdditionalTerms(_) => WizardStep::AdditionalTerms,
            StepView::CustomClauses(_) => WizardStep::CustomClauses,
            StepView::Review(_) => WizardStep::Review,
        }
    }

    /// Whether the primary action is enabled; on review that is finalize
    pub fn can_continue(&self) -> bool {
        match self {
            StepView::Template(form) => form.can_continue(),
            StepView::Property(form) => form.can_continue(),
            StepView::Tenant(form) => form.can_continue(),
            StepView::Terms(form) => form.can_continue(),
            StepView::AdditionalTerms(form) => form.can_continue(),
            StepView::CustomClauses(form) => form.can_continue(),
            StepView::Review(summary) => summary.is_ready(),
        }
    }
}

pub struct StepController {
    store: LeaseDraftStore,
    properties: Arc<dyn PropertyCatalog>,
    landlord: LandlordContext,
    config: BuilderConfig,
}

impl StepController {
    pub fn new(
        config: BuilderConfig,
        landlord: LandlordContext,
        templates: Arc<dyn TemplateCatalog>,
        properties: Arc<dyn PropertyCatalog>,
        repository: Arc<dyn LeaseRepository>,
    ) -> Self {
        Self {
            store: LeaseDraftStore::new(templates, repository),
            properties,
            landlord,
            config,
        }
    }

    /// Reopens a saved draft at the step it was saved on
    pub fn resume(
        config: BuilderConfig,
        landlord: LandlordContext,
        templates: Arc<dyn TemplateCatalog>,
        properties: Arc<dyn PropertyCatalog>,
        repository: Arc<dyn LeaseRepository>,
        lease_id: LeaseId,
    ) -> Result<Self, LeaseError> {
        let record = repository.load_draft(lease_id)?;
        let store = LeaseDraftStore::resume(record, templates, repository)?;
        Ok(Self {
            store,
            properties,
            landlord,
            config,
        })
    }

    pub fn store(&self) -> &LeaseDraftStore {
        &self.store
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn current_step(&self) -> WizardStep {
        self.store.current_step()
    }

    pub fn status(&self) -> LeaseStatus {
        self.store.status()
    }

    /// Builds the form for the current step, seeded from the lease
    pub fn active_form(&self) -> StepView {
        let lease = self.store.lease();
        match self.store.current_step() {
            WizardStep::Template => StepView::Template(TemplateForm::new(
                self.store.templates().list_templates(),
                lease.template_id.as_ref(),
            )),
            WizardStep::Property => StepView::Property(PropertyForm::new(
                self.properties.list_properties(self.landlord.owner_id),
                lease.property.as_ref(),
            )),
            WizardStep::Tenant => {
                StepView::Tenant(TenantForm::new(self.landlord.clone(), lease.parties.as_ref()))
            }
            WizardStep::Terms => {
                let today = self.config.timezone.today();
                let form = match &lease.terms {
                    Some(terms) => TermsForm::from_terms(&self.config, terms, today),
                    None => {
                        let months = self
                            .store
                            .current_template()
                            .map(|t| t.default_duration_months)
                            .unwrap_or(self.config.default_duration_months);
                        TermsForm::new(&self.config, months, today)
                    }
                };
                StepView::Terms(form)
            }
            WizardStep::AdditionalTerms => StepView::AdditionalTerms(AdditionalTermsForm::new(
                self.config.currency,
                self.store.current_template(),
                lease.selected_clauses.clone(),
                lease.additional_terms.as_ref(),
            )),
            WizardStep::CustomClauses => {
                StepView::CustomClauses(CustomClausesForm::new(lease.custom_clauses.as_deref()))
            }
            WizardStep::Review => StepView::Review(self.review_summary()),
        }
    }

    /// Confirms a form and advances the wizard
    ///
    /// # Errors
    ///
    /// - `LeaseError::ValidationFailed` if the form's predicate is false
    /// - `LeaseError::StepMismatch` if the form is not for the current step
    pub fn confirm<F: StepForm>(&mut self, form: F) -> Result<WizardStep, LeaseError> {
        let proof = form.confirm()?;
        for warning in proof.warnings() {
            tracing::debug!(lease_id = %self.store.lease_id(), step = %proof.step(), warning = %warning, "Step warning");
        }
        self.store.next_step(proof)
    }

    pub fn back(&mut self) -> WizardStep {
        self.store.prev_step()
    }

    pub fn review_summary(&self) -> ReviewSummary {
        ReviewSummary::from_draft(self.store.lease(), self.store.current_template().as_ref())
    }

    pub fn save_draft(&mut self) -> Result<LeaseRecord, LeaseError> {
        self.store.save_draft()
    }

    /// Finalizes from the review step
    ///
    /// The chosen unit is looked up again first: it may have been let since
    /// the property step was confirmed.
    ///
    /// # Errors
    ///
    /// - `LeaseError::StepMismatch` if the wizard is not on the review step
    /// - `LeaseError::UnitNotFound` / `LeaseError::UnitOccupied` if the unit
    ///   is no longer available
    /// - any error from [`LeaseDraftStore::finalize`]
    pub fn finalize(&mut self) -> Result<LeaseDocument, LeaseError> {
        if self.store.current_step() != WizardStep::Review {
            return Err(LeaseError::StepMismatch {
                expected: self.store.current_step(),
                actual: WizardStep::Review,
            });
        }

        if let Some(selection) = &self.store.lease().property {
            let unit = self
                .properties
                .find_property(self.landlord.owner_id, &selection.property_id)
                .and_then(|p| p.unit(&selection.unit_id).cloned());
            match unit {
                None => return Err(LeaseError::UnitNotFound(selection.unit_id.to_string())),
                Some(unit) if unit.occupied => {
                    return Err(LeaseError::UnitOccupied(selection.unit_id.to_string()))
                }
                Some(_) => {}
            }
        }

        self.store.finalize()
    }

    /// Abandons the lease in progress; saved drafts are kept
    pub fn cancel(&mut self) {
        self.store.reset_builder();
    }

    /// Vacant units of one of the owner's properties
    pub fn available_units(&self, property_id: &PropertyId) -> Vec<Unit> {
        self.properties
            .find_property(self.landlord.owner_id, property_id)
            .map(|p| p.vacant_units().cloned().collect())
            .unwrap_or_default()
    }

    pub fn take_events(&mut self) -> Vec<LeaseEvent> {
        self.store.take_events()
    }
}
