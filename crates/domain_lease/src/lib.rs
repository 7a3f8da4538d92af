//! Lease Builder Domain
//!
//! A seven-step wizard that assembles a lease record section by section,
//! gates each forward move behind that step's validation and produces either
//! a saved draft or a finalized lease document.
//!
//! # Architecture
//!
//! - **Store**: [`LeaseDraftStore`] holds the lease, current step and status
//! - **Step forms**: one per input step, each producing a [`ValidatedStep`]
//!   proof when its predicate holds
//! - **Controller**: [`StepController`] seeds forms and guards finalize
//! - **Ports**: template and property catalogs (`domain_catalog`), and the
//!   [`LeaseRepository`] for persistence
//!
//! # Wizard
//!
//! ```text
//! Template -> Property -> Tenant -> Terms -> Additional -> Custom -> Review
//!                                                                    |
//!                                               save_draft / finalize
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_lease::{StepController, StepView};
//!
//! let mut wizard = StepController::new(config, landlord, templates, properties, repository);
//! if let StepView::Template(mut form) = wizard.active_form() {
//!     form.select(&"residential-standard".into());
//!     wizard.confirm(form)?;
//! }
//! ```

pub mod config;
pub mod controller;
pub mod document;
pub mod draft;
pub mod error;
pub mod events;
pub mod repository;
pub mod status;
pub mod steps;
pub mod store;
pub mod terms;
pub mod validation;

pub use config::{BuilderConfig, MAX_DURATION_MONTHS};
pub use controller::{StepController, StepView};
pub use document::{DocumentClause, LeaseDocument, LeaseRecord, ReviewSummary};
pub use draft::{
    AdditionalTerms, LeaseDraft, LeasePatch, MaintenanceResponsibility, Parties,
    PropertySelection, Utility,
};
pub use error::LeaseError;
pub use events::LeaseEvent;
pub use repository::{InMemoryLeaseRepository, LeaseRepository};
pub use status::{LeaseStatus, WizardStep};
pub use steps::{
    AdditionalTermsForm, CustomClausesForm, LandlordContext, PropertyForm, StepCommit, StepForm,
    TemplateForm, TenantForm, TermsForm, ValidatedStep,
};
pub use store::LeaseDraftStore;
pub use terms::{compute_end_date, LeaseTerms, PaymentSchedule};
pub use validation::{validate_draft, FieldError, ValidationResult};
