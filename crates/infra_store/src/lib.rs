//! Lease Storage Infrastructure
//!
//! Adapters for the lease builder's
//! [`LeaseRepository`](domain_lease::LeaseRepository) port:
//!
//! - [`FileLeaseRepository`]: one JSON file per draft or finalized lease
//! - [`InMemoryLeaseRepository`]: process-local, re-exported from the domain
//!   crate for callers that only depend on this one
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use infra_store::FileLeaseRepository;
//!
//! let config = BuilderConfig::from_env()?;
//! let repository = Arc::new(FileLeaseRepository::from_config(&config)?);
//! ```

pub mod error;
pub mod file;

pub use domain_lease::InMemoryLeaseRepository;
pub use error::StoreError;
pub use file::FileLeaseRepository;
