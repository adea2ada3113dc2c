//! Test Utilities Crate
//!
//! Shared test infrastructure for the car insurance records workspace.
//!
//! # Modules
//!
//! - `fixtures`: the reference owners, cars and dates used across tests
//! - `builders`: builders for policies and claims
//! - `database`: PostgreSQL test container management
//! - `assertions`: assertion helpers for histories and scan reports
//! - `generators`: proptest strategies and `fake` helpers

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
