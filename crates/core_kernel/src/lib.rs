//! Core Kernel - Foundational types for the car insurance records service
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Strongly-typed identifiers for owners, cars, policies and claims
//! - Coverage periods and the trailing expiration window
//! - Non-negative claim amounts
//! - The port error type returned by every storage adapter

pub mod identifiers;
pub mod temporal;
pub mod money;
pub mod ports;
pub mod error;

pub use identifiers::{OwnerId, CarId, PolicyId, ClaimId};
pub use temporal::{CoveragePeriod, ExpirationWindow, TemporalError};
pub use money::{ClaimAmount, AmountError};
pub use ports::{PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth};
pub use error::{CoreError, parse_calendar_date};
