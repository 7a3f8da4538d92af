//! The lease record under construction
//!
//! [`LeaseDraft`] starts empty and is filled section by section as each
//! wizard step is confirmed. Steps write whole sections through a
//! [`LeasePatch`]; merging replaces a section wholesale and never merges its
//! sub-fields.

use std::collections::BTreeSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClauseId, Money, OwnerId, PropertyId, TemplateId, UnitId};
use domain_catalog::{LeaseType, Property, Unit};

use crate::terms::LeaseTerms;

/// The lease record assembled by the wizard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseDraft {
    pub template_id: Option<TemplateId>,
    pub lease_type: Option<LeaseType>,
    #[serde(default)]
    pub selected_clauses: BTreeSet<ClauseId>,
    pub property: Option<PropertySelection>,
    pub parties: Option<Parties>,
    pub terms: Option<LeaseTerms>,
    pub additional_terms: Option<AdditionalTerms>,
    pub custom_clauses: Option<String>,
}

impl LeaseDraft {
    /// True when nothing has been entered yet
    pub fn is_pristine(&self) -> bool {
        *self == LeaseDraft::default()
    }

    /// Shallow-merges a patch: every key present in the patch replaces the
    /// corresponding section
    pub fn apply(&mut self, patch: LeasePatch) {
        if let Some(template_id) = patch.template_id {
            self.template_id = Some(template_id);
        }
        if let Some(lease_type) = patch.lease_type {
            self.lease_type = Some(lease_type);
        }
        if let Some(selected_clauses) = patch.selected_clauses {
            self.selected_clauses = selected_clauses;
        }
        if let Some(property) = patch.property {
            self.property = Some(property);
        }
        if let Some(parties) = patch.parties {
            self.parties = Some(parties);
        }
        if let Some(terms) = patch.terms {
            self.terms = Some(terms);
        }
        if let Some(additional_terms) = patch.additional_terms {
            self.additional_terms = Some(additional_terms);
        }
        if let Some(custom_clauses) = patch.custom_clauses {
            self.custom_clauses = custom_clauses;
        }
    }
}

/// The property and unit a lease covers, copied from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySelection {
    pub property_id: PropertyId,
    pub unit_id: UnitId,
    pub address: String,
    pub unit_number: String,
    pub bedrooms: u8,
    pub bathrooms: Decimal,
    pub sqft: u32,
}

impl PropertySelection {
    pub fn from_catalog(property: &Property, unit: &Unit) -> Self {
        Self {
            property_id: property.id.clone(),
            unit_id: unit.id.clone(),
            address: property.address.clone(),
            unit_number: unit.unit_number.clone(),
            bedrooms: unit.bedrooms,
            bathrooms: unit.bathrooms,
            sqft: unit.sqft,
        }
    }
}

/// Landlord and tenant contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parties {
    pub landlord_id: OwnerId,
    pub landlord_name: String,
    pub landlord_email: String,
    pub landlord_phone: String,
    pub tenant_name: String,
    pub tenant_email: String,
    pub tenant_phone: String,
}

/// Utilities the landlord pays for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Utility {
    Water,
    Sewer,
    Trash,
    Electricity,
    Gas,
    Internet,
    Cable,
}

/// Who handles routine maintenance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceResponsibility {
    #[default]
    Landlord,
    Tenant,
    Shared,
}

impl fmt::Display for MaintenanceResponsibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MaintenanceResponsibility::Landlord => "landlord",
            MaintenanceResponsibility::Tenant => "tenant",
            MaintenanceResponsibility::Shared => "shared",
        };
        f.write_str(label)
    }
}

/// House rules and extras
///
/// `pet_deposit` and `parking_fee` exist only when pets are allowed or at
/// least one parking spot is assigned; otherwise the keys are absent from the
/// serialized form rather than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalTerms {
    pub pets_allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_deposit: Option<Money>,
    pub smoking_allowed: bool,
    pub parking_spots: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parking_fee: Option<Money>,
    #[serde(default)]
    pub utilities_included: Vec<Utility>,
    #[serde(default)]
    pub maintenance_responsibility: MaintenanceResponsibility,
}

impl AdditionalTerms {
    /// Builds the section, dropping `pet_deposit` unless pets are allowed and
    /// `parking_fee` unless at least one spot is assigned
    pub fn new(
        pets_allowed: bool,
        pet_deposit: Money,
        smoking_allowed: bool,
        parking_spots: u8,
        parking_fee: Money,
        utilities_included: impl IntoIterator<Item = Utility>,
        maintenance_responsibility: MaintenanceResponsibility,
    ) -> Self {
        let mut utilities: Vec<Utility> = utilities_included.into_iter().collect();
        utilities.sort();
        utilities.dedup();

        Self {
            pets_allowed,
            pet_deposit: pets_allowed.then_some(pet_deposit),
            smoking_allowed,
            parking_spots,
            parking_fee: (parking_spots > 0).then_some(parking_fee),
            utilities_included: utilities,
            maintenance_responsibility,
        }
    }
}

/// A partial lease written by one step
///
/// `None` leaves a section untouched; `Some` replaces it. `custom_clauses`
/// nests an `Option` so a step can clear the text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeasePatch {
    pub template_id: Option<TemplateId>,
    pub lease_type: Option<LeaseType>,
    pub selected_clauses: Option<BTreeSet<ClauseId>>,
    pub property: Option<PropertySelection>,
    pub parties: Option<Parties>,
    pub terms: Option<LeaseTerms>,
    pub additional_terms: Option<AdditionalTerms>,
    pub custom_clauses: Option<Option<String>>,
}

impl LeasePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, property: PropertySelection) -> Self {
        self.property = Some(property);
        self
    }

    pub fn parties(mut self, parties: Parties) -> Self {
        self.parties = Some(parties);
        self
    }

    pub fn terms(mut self, terms: LeaseTerms) -> Self {
        self.terms = Some(terms);
        self
    }

    pub fn additional_terms(mut self, additional_terms: AdditionalTerms) -> Self {
        self.additional_terms = Some(additional_terms);
        self
    }

    pub fn selected_clauses(mut self, clauses: BTreeSet<ClauseId>) -> Self {
        self.selected_clauses = Some(clauses);
        self
    }

    pub fn custom_clauses(mut self, text: Option<String>) -> Self {
        self.custom_clauses = Some(text);
        self
    }

    /// Names of the sections this patch replaces, for logging
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys = Vec::new();
        if self.template_id.is_some() {
            keys.push("template_id");
        }
        if self.lease_type.is_some() {
            keys.push("lease_type");
        }
        if self.selected_clauses.is_some() {
            keys.push("selected_clauses");
        }
        if self.property.is_some() {
            keys.push("property");
        }
        if self.parties.is_some() {
            keys.push("parties");
        }
        if self.terms.is_some() {
            keys.push("terms");
        }
        if self.additional_terms.is_some() {
            keys.push("additional_terms");
        }
        if self.custom_clauses.is_some() {
            keys.push("custom_clauses");
        }
        keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    fn usd(amount: Decimal) -> Money {
        Money::new(amount, Currency::USD)
    }

    #[test]
    fn test_default_draft_is_pristine() {
        assert!(LeaseDraft::default().is_pristine());
    }

    #[test]
    fn test_patch_replaces_whole_section() {
        let mut draft = LeaseDraft::default();
        draft.apply(LeasePatch::new().additional_terms(AdditionalTerms::new(
            true,
            usd(dec!(300)),
            false,
            1,
            usd(dec!(50)),
            [Utility::Water],
            MaintenanceResponsibility::Landlord,
        )));

        draft.apply(LeasePatch::new().additional_terms(AdditionalTerms {
            smoking_allowed: true,
            ..AdditionalTerms::default()
        }));

        let extras = draft.additional_terms.unwrap();
        assert!(extras.smoking_allowed);
        assert!(!extras.pets_allowed);
        assert_eq!(extras.pet_deposit, None);
        assert!(extras.utilities_included.is_empty());
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut draft = LeaseDraft {
            custom_clauses: Some("No grills on balconies".to_string()),
            ..LeaseDraft::default()
        };
        let before = draft.clone();
        draft.apply(LeasePatch::new());
        assert_eq!(draft, before);
        assert!(LeasePatch::new().is_empty());
    }

    #[test]
    fn test_custom_clauses_can_be_cleared() {
        let mut draft = LeaseDraft {
            custom_clauses: Some("No grills on balconies".to_string()),
            ..LeaseDraft::default()
        };
        draft.apply(LeasePatch::new().custom_clauses(None));
        assert_eq!(draft.custom_clauses, None);
    }

    #[test]
    fn test_conditional_fields_absent_from_json() {
        let extras = AdditionalTerms::new(
            false,
            usd(dec!(300)),
            false,
            0,
            usd(dec!(50)),
            Vec::<Utility>::new(),
            MaintenanceResponsibility::Tenant,
        );
        let json = serde_json::to_value(&extras).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("pet_deposit"));
        assert!(!object.contains_key("parking_fee"));
        assert_eq!(object["parking_spots"], 0);
    }

    #[test]
    fn test_conditional_fields_present_when_enabled() {
        let extras = AdditionalTerms::new(
            true,
            usd(dec!(0)),
            false,
            2,
            usd(dec!(75)),
            [Utility::Trash, Utility::Water, Utility::Trash],
            MaintenanceResponsibility::Shared,
        );
        assert_eq!(extras.pet_deposit, Some(usd(dec!(0))));
        assert_eq!(extras.parking_fee, Some(usd(dec!(75))));
        assert_eq!(extras.utilities_included, vec![Utility::Water, Utility::Trash]);
    }
}
