//! Test Utilities Crate
//!
//! Shared test infrastructure, fixtures, and helpers for the lease builder
//! test suite.
//!
//! # Modules
//!
//! - `fixtures`: Catalog, party and money data for the reference scenario
//! - `builders`: Draft and record builders, plus a wizard driver
//! - `assertions`: Custom assertion helpers for lease types
//! - `generators`: Property-based and fake data generators
//! - `telemetry`: Test-scoped tracing subscriber

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;
pub mod telemetry;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
pub use telemetry::*;
