//! Test Data Builders
//!
//! Builders for lease drafts and records with the reference scenario as
//! defaults, so tests only spell out what they vary. [`drive_to_review`]
//! fills the wizard through its forms instead of writing the draft directly.

use chrono::{DateTime, NaiveDate, Utc};

use core_kernel::{LeaseId, Money};
use domain_catalog::TemplateCatalog;
use domain_lease::{
    AdditionalTerms, LeaseDraft, LeaseRecord, LeaseStatus, LeaseTerms, Parties, PropertySelection,
    StepController, StepView, WizardStep,
};

use crate::fixtures::{CatalogFixtures, DateFixtures, MoneyFixtures, PartyFixtures};

/// Builder for a complete, finalizable lease draft
pub struct LeaseDraftBuilder {
    start_date: NaiveDate,
    duration_months: u32,
    rent: Money,
    deposit: Money,
    tenant_name: String,
    tenant_email: String,
    tenant_phone: String,
    additional_terms: Option<AdditionalTerms>,
    custom_clauses: Option<String>,
    with_property: bool,
    with_parties: bool,
    with_terms: bool,
}

impl Default for LeaseDraftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LeaseDraftBuilder {
    pub fn new() -> Self {
        Self {
            start_date: DateFixtures::lease_start(),
            duration_months: 12,
            rent: MoneyFixtures::usd_rent(),
            deposit: MoneyFixtures::usd_deposit(),
            tenant_name: PartyFixtures::tenant_name().to_string(),
            tenant_email: PartyFixtures::tenant_email().to_string(),
            tenant_phone: PartyFixtures::tenant_phone().to_string(),
            additional_terms: None,
            custom_clauses: None,
            with_property: true,
            with_parties: true,
            with_terms: true,
        }
    }

    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    pub fn with_duration_months(mut self, months: u32) -> Self {
        self.duration_months = months;
        self
    }

    pub fn with_rent(mut self, rent: Money) -> Self {
        self.rent = rent;
        self
    }

    pub fn with_deposit(mut self, deposit: Money) -> Self {
        self.deposit = deposit;
        self
    }

    pub fn with_tenant(mut self, name: &str, email: &str, phone: &str) -> Self {
        self.tenant_name = name.to_string();
        self.tenant_email = email.to_string();
        self.tenant_phone = phone.to_string();
        self
    }

    pub fn with_additional_terms(mut self, extras: AdditionalTerms) -> Self {
        self.additional_terms = Some(extras);
        self
    }

    pub fn with_custom_clauses(mut self, text: impl Into<String>) -> Self {
        self.custom_clauses = Some(text.into());
        self
    }

    /// Leaves the property section empty
    pub fn without_property(mut self) -> Self {
        self.with_property = false;
        self
    }

    /// Leaves the parties section empty
    pub fn without_parties(mut self) -> Self {
        self.with_parties = false;
        self
    }

    /// Leaves the terms section empty
    pub fn without_terms(mut self) -> Self {
        self.with_terms = false;
        self
    }

    /// Builds the draft
    ///
    /// # Panics
    ///
    /// Panics if the configured terms are invalid (mismatched currencies or
    /// an out-of-range end date).
    pub fn build(self) -> LeaseDraft {
        let template = CatalogFixtures::template_catalog()
            .lookup_template(&CatalogFixtures::residential_template_id())
            .unwrap();
        let property = CatalogFixtures::maple_court();
        let unit = property.unit(&CatalogFixtures::vacant_unit_id()).unwrap().clone();
        let landlord = PartyFixtures::landlord();

        LeaseDraft {
            template_id: Some(template.id.clone()),
            lease_type: Some(template.lease_type),
            selected_clauses: template.required_clause_ids(),
            property: self
                .with_property
                .then(|| PropertySelection::from_catalog(&property, &unit)),
            parties: self.with_parties.then(|| Parties {
                landlord_id: landlord.owner_id,
                landlord_name: landlord.name,
                landlord_email: landlord.email,
                landlord_phone: landlord.phone,
                tenant_name: self.tenant_name,
                tenant_email: self.tenant_email,
                tenant_phone: self.tenant_phone,
            }),
            terms: self.with_terms.then(|| {
                LeaseTerms::new(self.start_date, self.duration_months, self.rent, self.deposit)
                    .unwrap()
            }),
            additional_terms: self.additional_terms,
            custom_clauses: self.custom_clauses,
        }
    }

    /// Builds a saved-draft record around the draft
    pub fn build_record(self, step: WizardStep, saved_at: DateTime<Utc>) -> LeaseRecord {
        LeaseRecord {
            id: LeaseId::new(),
            status: LeaseStatus::Draft,
            current_step: step,
            draft: self.build(),
            saved_at,
        }
    }
}

/// Fills every step of a fresh wizard with the reference scenario
///
/// # Panics
///
/// Panics if the wizard is not on the template step or any step refuses the
/// fixture data.
pub fn drive_to_review(wizard: &mut StepController) {
    let StepView::Template(mut form) = wizard.active_form() else {
        panic!("wizard must start on the template step");
    };
    form.select(&CatalogFixtures::residential_template_id());
    wizard.confirm(form).unwrap();

    let StepView::Property(mut form) = wizard.active_form() else {
        panic!("expected property step");
    };
    form.select_property(&CatalogFixtures::property_id());
    form.select_unit(&CatalogFixtures::vacant_unit_id());
    wizard.confirm(form).unwrap();

    let StepView::Tenant(mut form) = wizard.active_form() else {
        panic!("expected tenant step");
    };
    form.tenant_name = PartyFixtures::tenant_name().to_string();
    form.tenant_email = PartyFixtures::tenant_email().to_string();
    form.tenant_phone = PartyFixtures::tenant_phone().to_string();
    wizard.confirm(form).unwrap();

    let StepView::Terms(mut form) = wizard.active_form() else {
        panic!("expected terms step");
    };
    form.enter_start_date(&DateFixtures::lease_start().to_string()).unwrap();
    form.enter_rent_amount(&MoneyFixtures::usd_rent().amount().to_string()).unwrap();
    form.set_security_deposit(MoneyFixtures::usd_deposit());
    wizard.confirm(form).unwrap();

    let StepView::AdditionalTerms(form) = wizard.active_form() else {
        panic!("expected additional terms step");
    };
    wizard.confirm(form).unwrap();

    let StepView::CustomClauses(form) = wizard.active_form() else {
        panic!("expected custom clauses step");
    };
    wizard.confirm(form).unwrap();
}
