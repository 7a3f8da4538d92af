//! Validation rules for the wizard steps
//!
//! Each step's "can continue" flag is the AND of its predicates:
//!
//! | step      | predicates |
//! |-----------|------------|
//! | Template  | a template is chosen |
//! | Property  | property and unit chosen, unit not occupied |
//! | Tenant    | tenant name, email and phone non-blank |
//! | Terms     | start date set, rent > 0, deposit >= 0 |
//! | others    | always valid |
//!
//! Warnings are advisory and never block a step.
//!
//! [`validate_draft`] re-runs the draft-level predicates of steps 1-4 at the
//! finalize boundary, plus the rule that a pet deposit or parking fee only
//! exists alongside allowed pets or assigned spots.

use std::fmt;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money};

use crate::draft::LeaseDraft;

/// A failed predicate tied to the input field that should show it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Outcome of validating a step or a whole draft
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<FieldError>,
    warnings: Vec<String>,
}

impl ValidationResult {
    /// Creates a passing result
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// First error for a field, for inline display next to the input
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Merges another result into this one
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
    }

    pub fn into_errors(self) -> Vec<FieldError> {
        self.errors
    }
}

/// Adds an error if the value is empty after trimming
pub fn require_text(result: &mut ValidationResult, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        result.add_error(field, format!("{} is required", label));
    }
}

/// Rent must be strictly positive and in the lease currency
pub fn check_rent(result: &mut ValidationResult, rent: &Money, currency: Currency) {
    if rent.currency() != currency {
        result.add_error(
            "rent_amount",
            format!("Rent must be in {}, got {}", currency, rent.currency()),
        );
    } else if !rent.is_positive() {
        result.add_error("rent_amount", "Rent amount must be greater than zero");
    }
}

/// Deposit may be zero but never negative, and must be in the lease currency
pub fn check_deposit(result: &mut ValidationResult, deposit: &Money, currency: Currency) {
    if deposit.currency() != currency {
        result.add_error(
            "security_deposit",
            format!("Deposit must be in {}, got {}", currency, deposit.currency()),
        );
    } else if deposit.is_negative() {
        result.add_error("security_deposit", "Security deposit cannot be negative");
    }
}

/// Basic email shape check, reported as a warning only
pub fn warn_on_email(result: &mut ValidationResult, email: &str) {
    let email = email.trim();
    if !email.is_empty() && (!email.contains('@') || !email.contains('.')) {
        result.add_warning(format!("'{}' does not look like an email address", email));
    }
}

/// Flags deposits above two months' rent, a common statutory cap
pub fn warn_on_deposit_cap(result: &mut ValidationResult, rent: &Money, deposit: &Money) {
    if rent.currency() == deposit.currency()
        && rent.is_positive()
        && deposit.amount() > rent.amount() * dec!(2)
    {
        result.add_warning(format!(
            "Security deposit {} exceeds two months' rent",
            deposit
        ));
    }
}

/// Re-validates the required sections of a draft before it is finalized
pub fn validate_draft(draft: &LeaseDraft) -> ValidationResult {
    let mut result = ValidationResult::ok();

    if draft.template_id.is_none() {
        result.add_error("template_id", "A lease template must be selected");
    }

    match &draft.property {
        Some(property) => {
            require_text(&mut result, "property_id", "Property", property.property_id.as_str());
            require_text(&mut result, "unit_id", "Unit", property.unit_id.as_str());
        }
        None => {
            result.add_error("property_id", "A property must be selected");
            result.add_error("unit_id", "A unit must be selected");
        }
    }

    match &draft.parties {
        Some(parties) => {
            require_text(&mut result, "tenant_name", "Tenant name", &parties.tenant_name);
            require_text(&mut result, "tenant_email", "Tenant email", &parties.tenant_email);
            require_text(&mut result, "tenant_phone", "Tenant phone", &parties.tenant_phone);
        }
        None => result.add_error("tenant_name", "Tenant details are required"),
    }

    match &draft.terms {
        Some(terms) => {
            let currency = terms.rent_amount.currency();
            check_rent(&mut result, &terms.rent_amount, currency);
            check_deposit(&mut result, &terms.security_deposit, currency);
            if !terms.is_consistent() {
                result.add_error(
                    "end_date",
                    format!(
                        "End date {} does not match start {} plus {} months",
                        terms.end_date(),
                        terms.start_date(),
                        terms.duration_months()
                    ),
                );
            }
        }
        None => result.add_error("start_date", "Lease terms are required"),
    }

    if let Some(extras) = &draft.additional_terms {
        if extras.pet_deposit.is_some() && !extras.pets_allowed {
            result.add_error("pet_deposit", "Pet deposit set but pets are not allowed");
        }
        if extras.parking_fee.is_some() && extras.parking_spots == 0 {
            result.add_error("parking_fee", "Parking fee set but no parking spots assigned");
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::AdditionalTerms;

    #[test]
    fn test_require_text_rejects_whitespace() {
        let mut result = ValidationResult::ok();
        require_text(&mut result, "tenant_name", "Tenant name", "   ");
        assert!(!result.is_valid());
        assert_eq!(result.error_for("tenant_name"), Some("Tenant name is required"));
    }

    #[test]
    fn test_rent_must_be_positive() {
        let mut result = ValidationResult::ok();
        check_rent(&mut result, &Money::zero(Currency::USD), Currency::USD);
        assert!(result.error_for("rent_amount").is_some());
    }

    #[test]
    fn test_zero_deposit_allowed() {
        let mut result = ValidationResult::ok();
        check_deposit(&mut result, &Money::zero(Currency::USD), Currency::USD);
        assert!(result.is_valid());
    }

    #[test]
    fn test_negative_deposit_rejected() {
        let mut result = ValidationResult::ok();
        check_deposit(&mut result, &Money::new(dec!(-1), Currency::USD), Currency::USD);
        assert!(result.error_for("security_deposit").is_some());
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut result = ValidationResult::ok();
        warn_on_email(&mut result, "jane-at-example");
        assert!(result.is_valid());
        assert_eq!(result.warnings().len(), 1);
    }

    #[test]
    fn test_empty_draft_reports_every_section() {
        let result = validate_draft(&LeaseDraft::default());
        let fields: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["template_id", "property_id", "unit_id", "tenant_name", "start_date"]
        );
    }

    #[test]
    fn test_orphaned_conditional_fees_rejected() {
        let usd = |amount| Money::new(amount, Currency::USD);
        let draft = LeaseDraft {
            additional_terms: Some(AdditionalTerms {
                pets_allowed: false,
                pet_deposit: Some(usd(dec!(500))),
                parking_spots: 0,
                parking_fee: Some(usd(dec!(75))),
                ..AdditionalTerms::default()
            }),
            ..LeaseDraft::default()
        };

        let result = validate_draft(&draft);
        assert!(result.error_for("pet_deposit").is_some());
        assert!(result.error_for("parking_fee").is_some());
    }

    #[test]
    fn test_conditional_fees_with_parent_flags_pass() {
        let extras = AdditionalTerms::new(
            true,
            Money::new(dec!(500), Currency::USD),
            false,
            1,
            Money::new(dec!(75), Currency::USD),
            Vec::new(),
            Default::default(),
        );
        let draft = LeaseDraft {
            additional_terms: Some(extras),
            ..LeaseDraft::default()
        };

        let result = validate_draft(&draft);
        assert!(result.error_for("pet_deposit").is_none());
        assert!(result.error_for("parking_fee").is_none());
    }
}
