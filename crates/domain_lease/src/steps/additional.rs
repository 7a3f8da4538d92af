use std::collections::BTreeSet;

use core_kernel::{ClauseId, Currency, Money};
use domain_catalog::{ClauseDefinition, LeaseTemplate};

use super::{StepCommit, StepForm};
use crate::draft::{AdditionalTerms, LeasePatch, MaintenanceResponsibility, Utility};
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::validation::ValidationResult;

/// Step 5: house rules, extras and optional clauses
///
/// Always valid. Pet deposit and parking fee are kept while editing but only
/// written to the draft when pets are allowed or a spot is assigned.
#[derive(Debug, Clone, PartialEq)]
pub struct AdditionalTermsForm {
    template: Option<LeaseTemplate>,
    selected_clauses: BTreeSet<ClauseId>,
    pub pets_allowed: bool,
    pub pet_deposit: Money,
    pub smoking_allowed: bool,
    pub parking_spots: u8,
    pub parking_fee: Money,
    utilities: BTreeSet<Utility>,
    pub maintenance_responsibility: MaintenanceResponsibility,
}

impl AdditionalTermsForm {
    pub fn new(
        currency: Currency,
        template: Option<LeaseTemplate>,
        selected_clauses: BTreeSet<ClauseId>,
        current: Option<&AdditionalTerms>,
    ) -> Self {
        let extras = current.cloned().unwrap_or_default();
        Self {
            template,
            selected_clauses,
            pets_allowed: extras.pets_allowed,
            pet_deposit: extras.pet_deposit.unwrap_or_else(|| Money::zero(currency)),
            smoking_allowed: extras.smoking_allowed,
            parking_spots: extras.parking_spots,
            parking_fee: extras.parking_fee.unwrap_or_else(|| Money::zero(currency)),
            utilities: extras.utilities_included.into_iter().collect(),
            maintenance_responsibility: extras.maintenance_responsibility,
        }
    }

    /// Template clauses paired with whether each is currently selected
    pub fn clauses(&self) -> Vec<(&ClauseDefinition, bool)> {
        self.template
            .iter()
            .flat_map(|t| t.clauses.iter())
            .map(|c| (c, c.required || self.selected_clauses.contains(&c.id)))
            .collect()
    }

    /// Flips an optional clause
    ///
    /// Returns false for required clauses and clauses the template does not
    /// list; those cannot be toggled.
    pub fn toggle_clause(&mut self, id: &ClauseId) -> bool {
        let Some(clause) = self.template.as_ref().and_then(|t| t.clause(id)) else {
            return false;
        };
        if clause.required {
            return false;
        }
        if !self.selected_clauses.remove(id) {
            self.selected_clauses.insert(id.clone());
        }
        true
    }

    pub fn is_selected(&self, id: &ClauseId) -> bool {
        self.selected_clauses.contains(id)
    }

    pub fn set_utility(&mut self, utility: Utility, included: bool) {
        if included {
            self.utilities.insert(utility);
        } else {
            self.utilities.remove(&utility);
        }
    }

    pub fn utilities(&self) -> impl Iterator<Item = &Utility> {
        self.utilities.iter()
    }
}

impl StepForm for AdditionalTermsForm {
    const STEP: WizardStep = WizardStep::AdditionalTerms;

    fn validate(&self) -> ValidationResult {
        ValidationResult::ok()
    }

    fn into_commit(self) -> Result<StepCommit, LeaseError> {
        let mut clauses = self.selected_clauses;
        if let Some(template) = &self.template {
            clauses.extend(template.required_clause_ids());
        }
        let extras = AdditionalTerms::new(
            self.pets_allowed,
            self.pet_deposit,
            self.smoking_allowed,
            self.parking_spots,
            self.parking_fee,
            self.utilities,
            self.maintenance_responsibility,
        );
        Ok(StepCommit::Merge(
            LeasePatch::new()
                .additional_terms(extras)
                .selected_clauses(clauses),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_catalog::standard_templates;
    use rust_decimal_macros::dec;

    fn residential() -> LeaseTemplate {
        standard_templates().remove(0)
    }

    fn form() -> AdditionalTermsForm {
        let template = residential();
        let required = template.required_clause_ids();
        AdditionalTermsForm::new(Currency::USD, Some(template), required, None)
    }

    #[test]
    fn test_required_clause_cannot_be_toggled() {
        let mut form = form();
        let rent = ClauseId::from("rent-payment");
        assert!(!form.toggle_clause(&rent));
        assert!(form.is_selected(&rent));
    }

    #[test]
    fn test_optional_clause_toggles() {
        let mut form = form();
        let pets = ClauseId::from("pet-policy");
        assert!(form.toggle_clause(&pets));
        assert!(form.is_selected(&pets));
        assert!(form.toggle_clause(&pets));
        assert!(!form.is_selected(&pets));
        assert!(!form.toggle_clause(&ClauseId::from("not-in-template")));
    }

    #[test]
    fn test_pet_deposit_dropped_when_pets_disallowed() {
        let mut form = form();
        form.pet_deposit = Money::new(dec!(400), Currency::USD);
        form.pets_allowed = false;

        let StepCommit::Merge(patch) = form.into_commit().unwrap() else {
            panic!("additional terms must merge a patch");
        };
        let extras = patch.additional_terms.unwrap();
        assert_eq!(extras.pet_deposit, None);
        assert_eq!(patch.selected_clauses.unwrap(), residential().required_clause_ids());
    }

    #[test]
    fn test_always_valid() {
        assert!(form().can_continue());
    }
}
