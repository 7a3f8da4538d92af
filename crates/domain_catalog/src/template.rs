//! Lease templates
//!
//! A template supplies the lease category, the default term length and the
//! clause list. Clauses flagged `required` seed the draft's clause selection
//! when the template is chosen and cannot be deselected afterwards.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use core_kernel::{ClauseId, DomainPort, TemplateId};

/// Lease category copied from the template onto the draft
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseType {
    Residential,
    Commercial,
    MonthToMonth,
    Sublease,
}

impl fmt::Display for LeaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LeaseType::Residential => "Residential",
            LeaseType::Commercial => "Commercial",
            LeaseType::MonthToMonth => "Month-to-Month",
            LeaseType::Sublease => "Sublease",
        };
        f.write_str(label)
    }
}

/// A clause a template can include
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseDefinition {
    pub id: ClauseId,
    pub title: String,
    pub required: bool,
}

impl ClauseDefinition {
    pub fn required(id: &str, title: &str) -> Self {
        Self {
            id: ClauseId::from(id),
            title: title.to_string(),
            required: true,
        }
    }

    pub fn optional(id: &str, title: &str) -> Self {
        Self {
            id: ClauseId::from(id),
            title: title.to_string(),
            required: false,
        }
    }
}

/// A predefined lease shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseTemplate {
    pub id: TemplateId,
    pub name: String,
    pub description: String,
    pub lease_type: LeaseType,
    pub default_duration_months: u32,
    pub clauses: Vec<ClauseDefinition>,
}

impl LeaseTemplate {
    /// The clause ids a draft must always carry for this template
    pub fn required_clause_ids(&self) -> BTreeSet<ClauseId> {
        self.clauses
            .iter()
            .filter(|c| c.required)
            .map(|c| c.id.clone())
            .collect()
    }

    /// Looks up a clause by id
    pub fn clause(&self, id: &ClauseId) -> Option<&ClauseDefinition> {
        self.clauses.iter().find(|c| &c.id == id)
    }

    /// Returns true if the clause is listed and required
    pub fn is_required(&self, id: &ClauseId) -> bool {
        self.clause(id).is_some_and(|c| c.required)
    }
}

/// Port for template lookups
pub trait TemplateCatalog: DomainPort {
    /// Resolves a template by id; `None` on a miss
    fn lookup_template(&self, id: &TemplateId) -> Option<LeaseTemplate>;

    /// All templates in display order
    fn list_templates(&self) -> Vec<LeaseTemplate>;
}

/// Template catalog backed by a map, preserving insertion order for listing
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateCatalog {
    order: Vec<TemplateId>,
    templates: HashMap<TemplateId, LeaseTemplate>,
}

impl InMemoryTemplateCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog preloaded with the standard lease templates
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for template in standard_templates() {
            catalog.insert(template);
        }
        catalog
    }

    /// Adds or replaces a template
    pub fn insert(&mut self, template: LeaseTemplate) {
        if !self.templates.contains_key(&template.id) {
            self.order.push(template.id.clone());
        }
        self.templates.insert(template.id.clone(), template);
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl DomainPort for InMemoryTemplateCatalog {}

impl TemplateCatalog for InMemoryTemplateCatalog {
    fn lookup_template(&self, id: &TemplateId) -> Option<LeaseTemplate> {
        let found = self.templates.get(id).cloned();
        if found.is_none() {
            tracing::debug!(template_id = %id, "Template lookup miss");
        }
        found
    }

    fn list_templates(&self) -> Vec<LeaseTemplate> {
        self.order
            .iter()
            .filter_map(|id| self.templates.get(id).cloned())
            .collect()
    }
}

/// The templates shipped with the builder
pub fn standard_templates() -> Vec<LeaseTemplate> {
    vec![
        LeaseTemplate {
            id: TemplateId::from("residential-standard"),
            name: "Residential Standard".to_string(),
            description: "Standard 12-month residential lease for apartments and condos".to_string(),
            lease_type: LeaseType::Residential,
            default_duration_months: 12,
            clauses: vec![
                ClauseDefinition::required("rent-payment", "Rent Payment"),
                ClauseDefinition::required("security-deposit", "Security Deposit"),
                ClauseDefinition::required("maintenance-repairs", "Maintenance and Repairs"),
                ClauseDefinition::required("right-of-entry", "Landlord Right of Entry"),
                ClauseDefinition::optional("late-fees", "Late Fees"),
                ClauseDefinition::optional("pet-policy", "Pet Policy"),
                ClauseDefinition::optional("subletting", "Subletting"),
                ClauseDefinition::optional("early-termination", "Early Termination"),
            ],
        },
        LeaseTemplate {
            id: TemplateId::from("month-to-month"),
            name: "Month-to-Month".to_string(),
            description: "Flexible rolling tenancy renewed each month".to_string(),
            lease_type: LeaseType::MonthToMonth,
            default_duration_months: 1,
            clauses: vec![
                ClauseDefinition::required("rent-payment", "Rent Payment"),
                ClauseDefinition::required("termination-notice", "Termination Notice"),
                ClauseDefinition::optional("late-fees", "Late Fees"),
                ClauseDefinition::optional("pet-policy", "Pet Policy"),
            ],
        },
        LeaseTemplate {
            id: TemplateId::from("commercial-standard"),
            name: "Commercial Standard".to_string(),
            description: "Multi-year lease for retail and office space".to_string(),
            lease_type: LeaseType::Commercial,
            default_duration_months: 36,
            clauses: vec![
                ClauseDefinition::required("rent-payment", "Rent Payment"),
                ClauseDefinition::required("permitted-use", "Permitted Use"),
                ClauseDefinition::required("common-area-maintenance", "Common Area Maintenance"),
                ClauseDefinition::required("insurance", "Insurance Requirements"),
                ClauseDefinition::optional("renewal-option", "Renewal Option"),
                ClauseDefinition::optional("signage", "Signage"),
            ],
        },
        LeaseTemplate {
            id: TemplateId::from("sublease"),
            name: "Sublease Agreement".to_string(),
            description: "Sublet of an existing lease with master-lease consent".to_string(),
            lease_type: LeaseType::Sublease,
            default_duration_months: 6,
            clauses: vec![
                ClauseDefinition::required("rent-payment", "Rent Payment"),
                ClauseDefinition::required("master-lease-consent", "Master Lease Consent"),
                ClauseDefinition::optional("pet-policy", "Pet Policy"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_lists_in_order() {
        let catalog = InMemoryTemplateCatalog::standard();
        let names: Vec<String> = catalog.list_templates().into_iter().map(|t| t.name).collect();
        assert_eq!(names[0], "Residential Standard");
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_required_clause_ids() {
        let catalog = InMemoryTemplateCatalog::standard();
        let template = catalog
            .lookup_template(&TemplateId::from("residential-standard"))
            .unwrap();

        let required = template.required_clause_ids();
        assert_eq!(required.len(), 4);
        assert!(required.contains(&ClauseId::from("rent-payment")));
        assert!(!required.contains(&ClauseId::from("late-fees")));
        assert!(template.is_required(&ClauseId::from("right-of-entry")));
        assert!(!template.is_required(&ClauseId::from("unknown")));
    }

    #[test]
    fn test_lookup_miss() {
        let catalog = InMemoryTemplateCatalog::standard();
        assert!(catalog.lookup_template(&TemplateId::from("nope")).is_none());
    }

    #[test]
    fn test_insert_replaces_without_duplicating_order() {
        let mut catalog = InMemoryTemplateCatalog::standard();
        let mut template = catalog
            .lookup_template(&TemplateId::from("sublease"))
            .unwrap();
        template.default_duration_months = 3;
        catalog.insert(template);

        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog
                .lookup_template(&TemplateId::from("sublease"))
                .unwrap()
                .default_duration_months,
            3
        );
    }
}
