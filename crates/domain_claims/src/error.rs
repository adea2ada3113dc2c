//! Claims domain errors

use thiserror::Error;

use core_kernel::{AmountError, CarId, PortError};

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Car {0} not found")]
    CarNotFound(CarId),

    #[error("Invalid claim amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}
