use core_kernel::{PropertyId, UnitId};
use domain_catalog::{Property, Unit};

use super::{StepCommit, StepForm};
use crate::draft::{LeasePatch, PropertySelection};
use crate::error::LeaseError;
use crate::status::WizardStep;
use crate::validation::ValidationResult;

/// Step 2: choose the property and unit being let
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyForm {
    properties: Vec<Property>,
    property_id: Option<PropertyId>,
    unit_id: Option<UnitId>,
}

impl PropertyForm {
    /// Creates the form over the owner's properties, restoring any earlier
    /// selection
    pub fn new(properties: Vec<Property>, current: Option<&PropertySelection>) -> Self {
        Self {
            properties,
            property_id: current.map(|s| s.property_id.clone()),
            unit_id: current.map(|s| s.unit_id.clone()),
        }
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Selects a property; changing it clears the unit
    ///
    /// Returns false and leaves the form unchanged if the owner has no such
    /// property.
    pub fn select_property(&mut self, id: &PropertyId) -> bool {
        if !self.properties.iter().any(|p| &p.id == id) {
            tracing::warn!(property_id = %id, "Ignoring unknown property selection");
            return false;
        }
        if self.property_id.as_ref() != Some(id) {
            self.property_id = Some(id.clone());
            self.unit_id = None;
        }
        true
    }

    /// Selects a unit of the chosen property
    ///
    /// Occupied units can be selected so the form can explain why it cannot
    /// continue; returns false only if the unit is not part of the property.
    pub fn select_unit(&mut self, id: &UnitId) -> bool {
        match self.selected_property() {
            Some(property) if property.unit(id).is_some() => {
                self.unit_id = Some(id.clone());
                true
            }
            _ => {
                tracing::warn!(unit_id = %id, "Ignoring unit outside the selected property");
                false
            }
        }
    }

    pub fn selected_property(&self) -> Option<&Property> {
        let id = self.property_id.as_ref()?;
        self.properties.iter().find(|p| &p.id == id)
    }

    pub fn selected_unit(&self) -> Option<&Unit> {
        let unit_id = self.unit_id.as_ref()?;
        self.selected_property()?.unit(unit_id)
    }

    /// Vacant units of the selected property
    pub fn available_units(&self) -> Vec<&Unit> {
        self.selected_property()
            .map(|p| p.vacant_units().collect())
            .unwrap_or_default()
    }
}

impl StepForm for PropertyForm {
    const STEP: WizardStep = WizardStep::Property;

    fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::ok();

        match (&self.property_id, self.selected_property()) {
            (None, _) => result.add_error("property_id", "Select a property"),
            (Some(id), None) => {
                result.add_error("property_id", format!("Property {} is no longer available", id))
            }
            (Some(_), Some(_)) => {}
        }

        match (&self.unit_id, self.selected_unit()) {
            (None, _) => result.add_error("unit_id", "Select a unit"),
            (Some(id), None) => {
                result.add_error("unit_id", format!("Unit {} is not part of this property", id))
            }
            (Some(_), Some(unit)) if unit.occupied => result.add_error(
                "unit_id",
                format!("Unit {} is already occupied", unit.unit_number),
            ),
            (Some(_), Some(_)) => {}
        }

        result
    }

    fn into_commit(self) -> Result<StepCommit, LeaseError> {
        let (property, unit) = match (self.selected_property(), self.selected_unit()) {
            (Some(p), Some(u)) => (p, u),
            _ => {
                let missing = self
                    .unit_id
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| "none selected".to_string());
                return Err(LeaseError::UnitNotFound(missing));
            }
        };
        if unit.occupied {
            return Err(LeaseError::UnitOccupied(unit.id.to_string()));
        }
        let selection = PropertySelection::from_catalog(property, unit);
        Ok(StepCommit::Merge(LeasePatch::new().property(selection)))
    }
}
