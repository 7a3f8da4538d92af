//! Pre-built Test Fixtures
//!
//! Ready-to-use catalog, party and money data for the lease builder. The
//! values mirror the reference scenario: Residential Standard template,
//! property P1 unit U1, tenant Jane Doe, starting 2026-03-01 at 1500/month.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{Currency, Money, OwnerId, PropertyId, TemplateId, UnitId};
use domain_catalog::{InMemoryPropertyCatalog, InMemoryTemplateCatalog, Property, Unit};
use domain_lease::{BuilderConfig, InMemoryLeaseRepository, LandlordContext, LeaseRepository, StepController};

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Monthly rent in the reference scenario
    pub fn usd_rent() -> Money {
        Money::new(dec!(1500.00), Currency::USD)
    }

    /// Security deposit in the reference scenario
    pub fn usd_deposit() -> Money {
        Money::new(dec!(1500.00), Currency::USD)
    }

    pub fn usd_zero() -> Money {
        Money::zero(Currency::USD)
    }

    /// Rent in the wrong currency for a USD builder
    pub fn eur_rent() -> Money {
        Money::new(dec!(1500.00), Currency::EUR)
    }
}

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// Reference lease start (2026-03-01)
    pub fn lease_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    /// Expected end of a 12-month lease from [`lease_start`](Self::lease_start)
    pub fn lease_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2027, 3, 1).unwrap()
    }

    /// Last day of January, for end-of-month clamping
    pub fn january_31() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
    }
}

/// Fixture for party data
pub struct PartyFixtures;

impl PartyFixtures {
    /// Fixed owner id so catalogs and landlord contexts line up across calls
    pub fn owner_id() -> OwnerId {
        OwnerId::from(Uuid::from_u128(0x0f0e_0d0c_0b0a_0908_0706_0504_0302_0100))
    }

    pub fn landlord() -> LandlordContext {
        LandlordContext {
            owner_id: Self::owner_id(),
            name: "Sam Owner".to_string(),
            email: "sam@owners.test".to_string(),
            phone: "555-0199".to_string(),
        }
    }

    pub fn tenant_name() -> &'static str {
        "Jane Doe"
    }

    pub fn tenant_email() -> &'static str {
        "jane@example.com"
    }

    pub fn tenant_phone() -> &'static str {
        "555-0100"
    }
}

/// Fixture for catalog data
pub struct CatalogFixtures;

impl CatalogFixtures {
    pub fn residential_template_id() -> TemplateId {
        TemplateId::from("residential-standard")
    }

    pub fn property_id() -> PropertyId {
        PropertyId::from("P1")
    }

    /// Vacant unit of [`maple_court`](Self::maple_court)
    pub fn vacant_unit_id() -> UnitId {
        UnitId::from("U1")
    }

    /// Occupied unit of [`maple_court`](Self::maple_court)
    pub fn occupied_unit_id() -> UnitId {
        UnitId::from("U2")
    }

    /// P1 with a vacant U1 and an occupied U2
    pub fn maple_court() -> Property {
        let unit = |id: &str, number: &str, occupied: bool| Unit {
            id: UnitId::from(id),
            unit_number: number.to_string(),
            bedrooms: 2,
            bathrooms: dec!(1.5),
            sqft: 900,
            occupied,
        };
        Property {
            id: Self::property_id(),
            owner_id: PartyFixtures::owner_id(),
            name: "Maple Court".to_string(),
            address: "12 Maple St".to_string(),
            units: vec![unit("U1", "1A", false), unit("U2", "1B", true)],
        }
    }

    pub fn property_catalog() -> InMemoryPropertyCatalog {
        let mut catalog = InMemoryPropertyCatalog::new();
        catalog.add_property(Self::maple_court()).unwrap();
        catalog
    }

    pub fn template_catalog() -> InMemoryTemplateCatalog {
        InMemoryTemplateCatalog::standard()
    }
}

/// A step controller over the fixture catalogs and the given repository
pub fn wizard_with(repository: Arc<dyn LeaseRepository>) -> StepController {
    StepController::new(
        BuilderConfig::default(),
        PartyFixtures::landlord(),
        Arc::new(CatalogFixtures::template_catalog()),
        Arc::new(CatalogFixtures::property_catalog()),
        repository,
    )
}

/// A step controller backed by a fresh in-memory repository
pub fn wizard() -> (StepController, Arc<InMemoryLeaseRepository>) {
    let repository = Arc::new(InMemoryLeaseRepository::new());
    (wizard_with(repository.clone()), repository)
}
