//! Shared fixtures for the lease builder integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use core_kernel::{Currency, DomainPort, Money, OwnerId, PropertyId, TemplateId, UnitId};
use domain_catalog::{
    InMemoryPropertyCatalog, InMemoryTemplateCatalog, Property, PropertyCatalog, Unit,
};
use domain_lease::{
    BuilderConfig, InMemoryLeaseRepository, LandlordContext, StepController, StepView, WizardStep,
};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn usd(amount: rust_decimal::Decimal) -> Money {
    Money::new(amount, Currency::USD)
}

pub fn landlord(owner_id: OwnerId) -> LandlordContext {
    LandlordContext {
        owner_id,
        name: "Sam Owner".to_string(),
        email: "sam@owners.test".to_string(),
        phone: "555-0199".to_string(),
    }
}

fn unit(id: &str, number: &str, occupied: bool) -> Unit {
    Unit {
        id: UnitId::from(id),
        unit_number: number.to_string(),
        bedrooms: 2,
        bathrooms: dec!(1),
        sqft: 850,
        occupied,
    }
}

/// P1 "Maple Court" with U1 vacant and U2 occupied
pub fn maple_court(owner_id: OwnerId) -> Property {
    Property {
        id: PropertyId::from("P1"),
        owner_id,
        name: "Maple Court".to_string(),
        address: "12 Maple St".to_string(),
        units: vec![unit("U1", "1A", false), unit("U2", "1B", true)],
    }
}

/// Property catalog whose occupancy can change while a wizard is open
#[derive(Debug, Default)]
pub struct SharedPropertyCatalog(RwLock<InMemoryPropertyCatalog>);

impl SharedPropertyCatalog {
    pub fn with(property: Property) -> Self {
        let mut inner = InMemoryPropertyCatalog::new();
        inner.add_property(property).unwrap();
        Self(RwLock::new(inner))
    }

    pub fn set_occupied(&self, property_id: &str, unit_id: &str, occupied: bool) {
        self.0
            .write()
            .unwrap()
            .set_occupied(&PropertyId::from(property_id), &UnitId::from(unit_id), occupied)
            .unwrap();
    }
}

impl DomainPort for SharedPropertyCatalog {}

impl PropertyCatalog for SharedPropertyCatalog {
    fn list_properties(&self, owner_id: OwnerId) -> Vec<Property> {
        self.0.read().unwrap().list_properties(owner_id)
    }
}

pub struct Harness {
    pub wizard: StepController,
    pub repository: Arc<InMemoryLeaseRepository>,
    pub properties: Arc<SharedPropertyCatalog>,
    pub templates: Arc<InMemoryTemplateCatalog>,
    pub owner_id: OwnerId,
}

pub fn harness() -> Harness {
    let owner_id = OwnerId::new();
    let repository = Arc::new(InMemoryLeaseRepository::new());
    let properties = Arc::new(SharedPropertyCatalog::with(maple_court(owner_id)));
    let templates = Arc::new(InMemoryTemplateCatalog::standard());
    let wizard = StepController::new(
        BuilderConfig::default(),
        landlord(owner_id),
        templates.clone(),
        properties.clone(),
        repository.clone(),
    );
    Harness {
        wizard,
        repository,
        properties,
        templates,
        owner_id,
    }
}

pub fn complete_template(wizard: &mut StepController, template: &str) {
    let StepView::Template(mut form) = wizard.active_form() else {
        panic!("expected template step, on {}", wizard.current_step());
    };
    assert!(form.select(&TemplateId::from(template)));
    wizard.confirm(form).unwrap();
}

pub fn complete_property(wizard: &mut StepController, property: &str, unit: &str) {
    let StepView::Property(mut form) = wizard.active_form() else {
        panic!("expected property step, on {}", wizard.current_step());
    };
    assert!(form.select_property(&PropertyId::from(property)));
    assert!(form.select_unit(&UnitId::from(unit)));
    wizard.confirm(form).unwrap();
}

pub fn complete_tenant(wizard: &mut StepController, name: &str, email: &str, phone: &str) {
    let StepView::Tenant(mut form) = wizard.active_form() else {
        panic!("expected tenant step, on {}", wizard.current_step());
    };
    form.tenant_name = name.to_string();
    form.tenant_email = email.to_string();
    form.tenant_phone = phone.to_string();
    wizard.confirm(form).unwrap();
}

pub fn complete_terms(wizard: &mut StepController, start: NaiveDate, rent: Money, deposit: Money) {
    let StepView::Terms(mut form) = wizard.active_form() else {
        panic!("expected terms step, on {}", wizard.current_step());
    };
    form.set_start_date(Some(start));
    form.set_rent_amount(rent);
    form.set_security_deposit(deposit);
    wizard.confirm(form).unwrap();
}

pub fn skip_optional_steps(wizard: &mut StepController) {
    let StepView::AdditionalTerms(form) = wizard.active_form() else {
        panic!("expected additional terms step, on {}", wizard.current_step());
    };
    wizard.confirm(form).unwrap();
    let StepView::CustomClauses(form) = wizard.active_form() else {
        panic!("expected custom clauses step, on {}", wizard.current_step());
    };
    wizard.confirm(form).unwrap();
}

/// Walks the reference scenario up to the review step
pub fn reach_review(wizard: &mut StepController) {
    complete_template(wizard, "residential-standard");
    complete_property(wizard, "P1", "U1");
    complete_tenant(wizard, "Jane Doe", "jane@example.com", "555-0100");
    complete_terms(wizard, date(2026, 3, 1), usd(dec!(1500)), usd(dec!(1500)));
    skip_optional_steps(wizard);
    assert_eq!(wizard.current_step(), WizardStep::Review);
}
