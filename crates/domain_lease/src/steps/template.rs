use core_kernel::TemplateId;
use domain_catalog::LeaseTemplate;

use super::{StepCommit, StepForm};
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::validation::ValidationResult;

/// Step 1: choose a lease template
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateForm {
    templates: Vec<LeaseTemplate>,
    selected: Option<TemplateId>,
}

impl TemplateForm {
    /// Creates the form over the catalog's templates, preselecting the
    /// draft's current template if it is still listed
    pub fn new(templates: Vec<LeaseTemplate>, current: Option<&TemplateId>) -> Self {
        let selected = current
            .filter(|id| templates.iter().any(|t| &t.id == *id))
            .cloned();
        Self {
            templates,
            selected,
        }
    }

    pub fn templates(&self) -> &[LeaseTemplate] {
        &self.templates
    }

    /// Selects a template; returns false and leaves the selection unchanged
    /// if the id is not offered
    pub fn select(&mut self, id: &TemplateId) -> bool {
        if self.templates.iter().any(|t| &t.id == id) {
            self.selected = Some(id.clone());
            true
        } else {
            tracing::warn!(template_id = %id, "Ignoring unknown template selection");
            false
        }
    }

    pub fn selected(&self) -> Option<&LeaseTemplate> {
        let id = self.selected.as_ref()?;
        self.templates.iter().find(|t| &t.id == id)
    }
}

impl StepForm for TemplateForm {
    const STEP: WizardStep = WizardStep::Template;

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if self.selected.is_none() {
            result.add_error("template_id", "Select a lease template to continue");
        }
        result
    }

    fn into_commit(self) -> Result<StepCommit, LeaseError> {
        self.selected
            .map(StepCommit::Template)
            .ok_or_else(|| LeaseError::TemplateNotFound("no template selected".to_string()))
    }
}
