//! Claims Domain
//!
//! Claims are appended to a car's timeline by the `ClaimRegistrar` and never
//! modified afterwards.

pub mod claim;
pub mod registrar;
pub mod ports;
pub mod error;

pub use claim::{InsuranceClaim, NewClaim, ClaimDraft};
pub use registrar::ClaimRegistrar;
pub use ports::ClaimPort;
pub use error::ClaimError;
