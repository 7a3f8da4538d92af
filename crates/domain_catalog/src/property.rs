//! Properties and units available to an owner

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{DomainPort, OwnerId, PortError, PropertyId, UnitId};

/// A rentable unit inside a property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub unit_number: String,
    pub bedrooms: u8,
    /// Half baths count as 0.5
    pub bathrooms: Decimal,
    pub sqft: u32,
    pub occupied: bool,
}

/// A building or complex owned by one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: OwnerId,
    pub name: String,
    pub address: String,
    pub units: Vec<Unit>,
}

impl Property {
    pub fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| &u.id == id)
    }

    /// Units that can be leased right now
    pub fn vacant_units(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|u| !u.occupied)
    }
}

/// Port for property lookups
pub trait PropertyCatalog: DomainPort {
    /// All properties belonging to the owner
    fn list_properties(&self, owner_id: OwnerId) -> Vec<Property>;

    /// Resolves one of the owner's properties; `None` on a miss
    fn find_property(&self, owner_id: OwnerId, property_id: &PropertyId) -> Option<Property> {
        self.list_properties(owner_id)
            .into_iter()
            .find(|p| &p.id == property_id)
    }
}

/// Property catalog held in memory, keyed by property id
#[derive(Debug, Clone, Default)]
pub struct InMemoryPropertyCatalog {
    properties: HashMap<PropertyId, Property>,
}

impl InMemoryPropertyCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property
    ///
    /// # Errors
    ///
    /// Returns `PortError::Conflict` if the id is already taken
    pub fn add_property(&mut self, property: Property) -> Result<(), PortError> {
        if self.properties.contains_key(&property.id) {
            return Err(PortError::conflict(format!(
                "property {} already registered",
                property.id
            )));
        }
        self.properties.insert(property.id.clone(), property);
        Ok(())
    }

    /// Flips a unit's occupancy flag, e.g. after a lease is signed elsewhere
    ///
    /// # Errors
    ///
    /// Returns `PortError::NotFound` if the property or unit is unknown
    pub fn set_occupied(
        &mut self,
        property_id: &PropertyId,
        unit_id: &UnitId,
        occupied: bool,
    ) -> Result<(), PortError> {
        let property = self
            .properties
            .get_mut(property_id)
            .ok_or_else(|| PortError::not_found("Property", property_id))?;
        let unit = property
            .units
            .iter_mut()
            .find(|u| &u.id == unit_id)
            .ok_or_else(|| PortError::not_found("Unit", unit_id))?;
        unit.occupied = occupied;
        Ok(())
    }
}

impl DomainPort for InMemoryPropertyCatalog {}

impl PropertyCatalog for InMemoryPropertyCatalog {
    fn list_properties(&self, owner_id: OwnerId) -> Vec<Property> {
        let mut owned: Vec<Property> = self
            .properties
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| a.id.cmp(&b.id));
        owned
    }
}
