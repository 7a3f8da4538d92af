//! Lease builder errors
//!
//! Validation failures inside a step never surface as errors: a form reports
//! them through [`ValidationResult`](crate::validation::ValidationResult) and
//! its `can_continue` flag. `LeaseError` covers the cases where a caller
//! pushed past that gate anyway, lookups that a transition depends on, and
//! storage failures.

use thiserror::Error;

use core_kernel::{CoreError, MoneyError, PortError, TemporalError};

use crate::status::WizardStep;
use crate::validation::FieldError;

/// Errors that can occur in the lease builder
#[derive(Debug, Error)]
pub enum LeaseError {
    /// A step proof was presented while the wizard is on another step
    #[error("Step mismatch: wizard is on {expected} but proof is for {actual}")]
    StepMismatch {
        expected: WizardStep,
        actual: WizardStep,
    },

    /// A step form was confirmed while its predicate is false
    #[error("{step} step failed validation: {}", summarize(.errors))]
    ValidationFailed {
        step: WizardStep,
        errors: Vec<FieldError>,
    },

    /// Finalize found required sections missing or invalid
    #[error("Lease is incomplete: {}", summarize(.errors))]
    Incomplete { errors: Vec<FieldError> },

    /// The draft cannot be changed in its current status
    #[error("Lease is {0} and cannot be modified")]
    NotModifiable(String),

    /// Template id did not resolve in the catalog
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    /// Property or unit id did not resolve in the catalog
    #[error("Unit not found: {0}")]
    UnitNotFound(String),

    /// The chosen unit is already let
    #[error("Unit {0} is already occupied")]
    UnitOccupied(String),

    /// Money or date arithmetic failed
    #[error("Calculation error: {0}")]
    Calculation(String),

    /// Builder configuration is invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Persistence failed
    #[error("Repository error: {0}")]
    Repository(#[from] PortError),
}

impl LeaseError {
    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        LeaseError::Configuration(message.into())
    }

    /// Returns the field errors carried by validation failures
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            LeaseError::ValidationFailed { errors, .. } | LeaseError::Incomplete { errors } => {
                errors
            }
            _ => &[],
        }
    }
}

impl From<MoneyError> for LeaseError {
    fn from(err: MoneyError) -> Self {
        LeaseError::Calculation(err.to_string())
    }
}

impl From<TemporalError> for LeaseError {
    fn from(err: TemporalError) -> Self {
        LeaseError::Calculation(err.to_string())
    }
}

impl From<CoreError> for LeaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration(msg) => LeaseError::Configuration(msg),
            other => LeaseError::Calculation(other.to_string()),
        }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
