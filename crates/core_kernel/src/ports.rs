//! Ports and Adapters Infrastructure
//!
//! Domain crates declare the read and write interfaces they need as port
//! traits extending [`DomainPort`]; adapters (in-memory catalogs, the JSON file
//! store) implement them. All port operations report failures as
//! [`PortError`].
//!
//! ```text
//!   StepController / LeaseDraftStore
//!                 │
//!                 ▼
//!   TemplateCatalog · PropertyCatalog · LeaseRepository   (port traits)
//!                 ▲
//!                 │
//!   InMemory*Catalog · FileLeaseRepository · InMemoryLeaseRepository
//! ```

use std::fmt;
use thiserror::Error;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
    },

    /// Reading or writing the backing store failed
    #[error("Storage error: {message}")]
    Storage {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A record could not be encoded or decoded
    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
    },

    /// An internal error occurred
    #[error("Internal error: {message}")]
    Internal {
        message: String,
    },
}

impl PortError {
    /// Creates a NotFound error
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    /// Creates a Storage error wrapping an underlying cause
    pub fn storage<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PortError::Storage {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        PortError::Serialization {
            message: message.into(),
        }
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }

    /// Returns true if this error indicates the entity was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Adapters are shared behind `Arc`, so every port must be thread-safe.
pub trait DomainPort: Send + Sync + 'static {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("LeaseRecord", "LSE-123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("LeaseRecord"));
        assert!(error.to_string().contains("LSE-123"));
    }

    #[test]
    fn test_storage_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let error = PortError::storage("write draft", io);
        assert!(matches!(error, PortError::Storage { .. }));
        assert!(std::error::Error::source(&error).is_some());
    }
}
