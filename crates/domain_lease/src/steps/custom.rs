use super::{StepCommit, StepForm};
use crate::draft::LeasePatch;
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::validation::ValidationResult;

/// Step 6: free-text clauses
///
/// Always valid; blank text clears the section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomClausesForm {
    pub text: String,
}

impl CustomClausesForm {
    pub fn new(current: Option<&str>) -> Self {
        Self {
            text: current.unwrap_or_default().to_string(),
        }
    }
}

impl StepForm for CustomClausesForm {
    const STEP: WizardStep = WizardStep::CustomClauses;

    fn validate(&self) -> ValidationResult {
        ValidationResult::ok()
    }

    fn into_commit(self) -> Result<StepCommit, LeaseError> {
        let trimmed = self.text.trim();
        let text = (!trimmed.is_empty()).then(|| trimmed.to_string());
        Ok(StepCommit::Merge(LeasePatch::new().custom_clauses(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn committed_text(form: CustomClausesForm) -> Option<String> {
        match form.into_commit().unwrap() {
            StepCommit::Merge(patch) => patch.custom_clauses.unwrap(),
            other => panic!("unexpected commit {:?}", other),
        }
    }

    #[test]
    fn test_blank_text_stored_as_none() {
        assert_eq!(committed_text(CustomClausesForm::new(Some("  \n "))), None);
    }

    #[test]
    fn test_text_is_trimmed() {
        let form = CustomClausesForm::new(Some("  No grills on balconies.\n"));
        assert_eq!(
            committed_text(form),
            Some("No grills on balconies.".to_string())
        );
    }
}
