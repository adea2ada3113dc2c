//! Insurance Policy Domain
//!
//! This crate owns the two rules that read policies:
//!
//! - **Coverage validity**: is a car insured on a given date?
//! - **Expiration scanning**: which policies ended in the trailing window and
//!   have not been reported yet?
//!
//! Policies are created outside the service. The only mutation this crate
//! performs is flipping `expiration_logged` from false to true, once.
//!
//! # Expiration Scanner Lifecycle
//!
//! ```text
//! Idle -> Scanning -> Logging -> Marking -> Idle
//!   \-> Cancelled
//! ```

pub mod policy;
pub mod coverage;
pub mod expiration;
pub mod ports;
pub mod error;

pub use policy::InsurancePolicy;
pub use coverage::CoverageChecker;
pub use expiration::{ExpirationScanner, ExpiredPolicy, ScanReport, ScannerConfig, ScannerState};
pub use ports::{PolicyPort, ExpirationSession, ExpirationSessionFactory};
pub use error::{PolicyError, CoverageError, ExpirationError};
