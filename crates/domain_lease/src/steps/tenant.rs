use serde::{Deserialize, Serialize};

use core_kernel::OwnerId;

use super::{StepCommit, StepForm};
use crate::draft::{LeasePatch, Parties};
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::validation::{require_text, warn_on_email, ValidationResult};

/// The authenticated owner building the lease
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandlordContext {
    pub owner_id: OwnerId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Step 3: tenant contact details
///
/// Landlord details are not entered; they come from the [`LandlordContext`].
#[derive(Debug, Clone, PartialEq)]
pub struct TenantForm {
    landlord: LandlordContext,
    pub tenant_name: String,
    pub tenant_email: String,
    pub tenant_phone: String,
}

impl TenantForm {
    pub fn new(landlord: LandlordContext, current: Option<&Parties>) -> Self {
        Self {
            landlord,
            tenant_name: current.map(|p| p.tenant_name.clone()).unwrap_or_default(),
            tenant_email: current.map(|p| p.tenant_email.clone()).unwrap_or_default(),
            tenant_phone: current.map(|p| p.tenant_phone.clone()).unwrap_or_default(),
        }
    }

    pub fn landlord(&self) -> &LandlordContext {
        &self.landlord
    }
}

impl StepForm for TenantForm {
    const STEP: WizardStep = WizardStep::Tenant;

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();
        require_text(&mut result, "tenant_name", "Tenant name", &self.tenant_name);
        require_text(&mut result, "tenant_email", "Tenant email", &self.tenant_email);
        require_text(&mut result, "tenant_phone", "Tenant phone", &self.tenant_phone);
        warn_on_email(&mut result, &self.tenant_email);
        result
    }

    fn into_commit(self) -> Result<StepCommit, LeaseError> {
        let parties = Parties {
            landlord_id: self.landlord.owner_id,
            landlord_name: self.landlord.name,
            landlord_email: self.landlord.email,
            landlord_phone: self.landlord.phone,
            tenant_name: self.tenant_name.trim().to_string(),
            tenant_email: self.tenant_email.trim().to_string(),
            tenant_phone: self.tenant_phone.trim().to_string(),
        };
        Ok(StepCommit::Merge(LeasePatch::new().parties(parties)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landlord() -> LandlordContext {
        LandlordContext {
            owner_id: OwnerId::new(),
            name: "Sam Owner".to_string(),
            email: "sam@owners.test".to_string(),
            phone: "555-0199".to_string(),
        }
    }

    #[test]
    fn test_blank_fields_block_continue() {
        let mut form = TenantForm::new(landlord(), None);
        form.tenant_name = "Jane Doe".to_string();
        form.tenant_email = "  ".to_string();
        form.tenant_phone = "555-0100".to_string();

        let result = form.validate();
        assert!(!result.is_valid());
        assert!(result.error_for("tenant_email").is_some());
    }

    #[test]
    fn test_malformed_email_only_warns() {
        let mut form = TenantForm::new(landlord(), None);
        form.tenant_name = "Jane Doe".to_string();
        form.tenant_email = "jane".to_string();
        form.tenant_phone = "555-0100".to_string();

        let proof = form.confirm().unwrap();
        assert_eq!(proof.warnings().len(), 1);
    }

    #[test]
    fn test_commit_trims_and_fills_landlord() {
        let mut form = TenantForm::new(landlord(), None);
        form.tenant_name = " Jane Doe ".to_string();
        form.tenant_email = "jane@example.com".to_string();
        form.tenant_phone = "555-0100".to_string();

        let StepCommit::Merge(patch) = form.into_commit().unwrap() else {
            panic!("tenant step must merge a patch");
        };
        let parties = patch.parties.unwrap();
        assert_eq!(parties.tenant_name, "Jane Doe");
        assert_eq!(parties.landlord_name, "Sam Owner");
    }
}
