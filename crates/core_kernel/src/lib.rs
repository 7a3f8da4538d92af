//! Core Kernel - Foundational types for the lease builder
//!
//! This crate provides the building blocks shared by the catalog, lease and
//! storage crates:
//! - Money types with precise decimal arithmetic
//! - Calendar-month arithmetic for lease periods
//! - Typed identifiers and catalog codes
//! - Port error and marker types for adapters

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod error;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use temporal::{add_months, parse_date, DateRange, TemporalError, Timezone};
pub use identifiers::{LeaseId, OwnerId, TemplateId, PropertyId, UnitId, ClauseId};
pub use error::CoreError;
pub use ports::{DomainPort, PortError};
