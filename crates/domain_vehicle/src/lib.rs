//! Vehicle Registry Domain
//!
//! Owners and their cars. Every other domain hangs its records off a car, so
//! this crate also provides the existence check that the coverage checker,
//! the claim registrar and the history merger run before doing any work.

pub mod owner;
pub mod car;
pub mod catalogue;
pub mod ports;

pub use owner::Owner;
pub use car::{Car, CarSummary};
pub use catalogue::CarCatalogue;
pub use ports::VehiclePort;
