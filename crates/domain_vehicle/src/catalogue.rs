//! Car catalogue service

use std::sync::Arc;

use core_kernel::PortError;
use tracing::debug;

use crate::car::CarSummary;
use crate::ports::VehiclePort;

/// Lists the registered cars together with their owners
#[derive(Clone)]
pub struct CarCatalogue {
    vehicles: Arc<dyn VehiclePort>,
}

impl CarCatalogue {
    pub fn new(vehicles: Arc<dyn VehiclePort>) -> Self {
        Self { vehicles }
    }

    /// Returns every car, ordered by identifier
    pub async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError> {
        let mut cars = self.vehicles.list_cars().await?;
        cars.sort_by_key(|car| car.id);
        debug!(count = cars.len(), "Listed cars");
        Ok(cars)
    }
}
