//! Policy domain errors

use thiserror::Error;

use core_kernel::{CarId, PolicyId, PortError, TemporalError};

/// Errors raised by policy entities
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The expiration flag only ever goes from false to true
    #[error("Expiration of policy {0} was already logged")]
    ExpirationAlreadyLogged(PolicyId),
}

/// Errors returned by the coverage checker
#[derive(Debug, Error)]
pub enum CoverageError {
    #[error("Car {0} not found")]
    CarNotFound(CarId),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

/// Errors that abandon a single expiration scan cycle
#[derive(Debug, Error)]
pub enum ExpirationError {
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),

    #[error("Invalid expiration window: {0}")]
    Window(#[from] TemporalError),
}

impl ExpirationError {
    /// Returns true if the next cycle may succeed without intervention
    pub fn is_transient(&self) -> bool {
        match self {
            ExpirationError::Storage(e) => e.is_transient(),
            ExpirationError::Window(_) => false,
        }
    }
}
