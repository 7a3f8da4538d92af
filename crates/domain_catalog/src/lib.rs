//! Catalog Domain
//!
//! Read-only lookups the lease builder depends on:
//!
//! - **Template catalog**: predefined lease shapes with a default type,
//!   duration and clause list ([`LeaseTemplate`])
//! - **Property catalog**: an owner's properties and their units, with the
//!   occupancy flag the property step gates on ([`Property`], [`Unit`])
//!
//! Both are exposed as port traits so the builder never reaches into a
//! concrete data source. The in-memory adapters here back tests and demos.

pub mod template;
pub mod property;

pub use template::{
    standard_templates, ClauseDefinition, InMemoryTemplateCatalog, LeaseTemplate, LeaseType,
    TemplateCatalog,
};
pub use property::{InMemoryPropertyCatalog, Property, PropertyCatalog, Unit};
