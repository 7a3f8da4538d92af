//! Step forms and the proof values that move the wizard forward
//!
//! Each of the first six wizard steps has a form that owns its local input
//! state. A form checks its slice of the lease with
//! [`validate`](StepForm::validate); once that passes,
//! [`confirm`](StepForm::confirm) turns the form into a [`ValidatedStep`],
//! the only value [`LeaseDraftStore::next_step`](crate::store::LeaseDraftStore::next_step)
//! accepts. `ValidatedStep` cannot be built outside this crate and
//! `StepForm` cannot be implemented outside it, so the store never advances
//! past a step whose predicate was false.
//!
//! The review step has no form: it only reads the draft.

mod additional;
mod custom;
mod property;
mod template;
mod tenant;
mod terms;

pub use additional::AdditionalTermsForm;
pub use custom::CustomClausesForm;
pub use property::PropertyForm;
pub use template::TemplateForm;
pub use tenant::{LandlordContext, TenantForm};
pub use terms::TermsForm;

use core_kernel::TemplateId;

use crate::draft::LeasePatch;
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::validation::ValidationResult;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::TemplateForm {}
    impl Sealed for super::PropertyForm {}
    impl Sealed for super::TenantForm {}
    impl Sealed for super::TermsForm {}
    impl Sealed for super::AdditionalTermsForm {}
    impl Sealed for super::CustomClausesForm {}
}

/// What a confirmed step writes into the draft
#[derive(Debug, Clone, PartialEq)]
pub enum StepCommit {
    /// Select a template, seeding type and required clauses
    Template(TemplateId),
    /// Shallow-merge a patch
    Merge(LeasePatch),
}

/// Proof that a step's predicate held when it was confirmed
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedStep {
    step: WizardStep,
    commit: StepCommit,
    warnings: Vec<String>,
}

impl ValidatedStep {
    pub(crate) fn new(step: WizardStep, commit: StepCommit, warnings: Vec<String>) -> Self {
        Self {
            step,
            commit,
            warnings,
        }
    }

    /// The step this proof was minted for
    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn commit(&self) -> &StepCommit {
        &self.commit
    }

    /// Advisory warnings raised when the step was confirmed
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub(crate) fn into_commit(self) -> StepCommit {
        self.commit
    }
}

/// A wizard step's local form
pub trait StepForm: sealed::Sealed {
    /// The step this form belongs to
    const STEP: WizardStep;

    /// Checks the form's fields; errors block the step, warnings do not
    fn validate(&self) -> ValidationResult;

    /// Whether the "continue" affordance is enabled
    fn can_continue(&self) -> bool {
        self.validate().is_valid()
    }

    /// Converts validated input into the change to apply to the draft
    fn into_commit(self) -> Result<StepCommit, LeaseError>
    where
        Self: Sized;

    /// Validates the form and, if it passes, mints the proof for this step
    ///
    /// # Errors
    ///
    /// Returns `LeaseError::ValidationFailed` listing every failing field.
    fn confirm(self) -> Result<ValidatedStep, LeaseError>
    where
        Self: Sized,
    {
        let result = self.validate();
        if !result.is_valid() {
            tracing::debug!(step = %Self::STEP, errors = result.errors().len(), "Step confirmation rejected");
            return Err(LeaseError::ValidationFailed {
                step: Self::STEP,
                errors: result.into_errors(),
            });
        }
        let warnings = result.warnings().to_vec();
        let commit = self.into_commit()?;
        Ok(ValidatedStep::new(Self::STEP, commit, warnings))
    }
}
