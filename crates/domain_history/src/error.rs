//! History domain errors

use thiserror::Error;

use core_kernel::{CarId, PortError};

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Car {0} not found")]
    CarNotFound(CarId),

    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}
