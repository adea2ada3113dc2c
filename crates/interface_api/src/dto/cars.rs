//! Car DTOs

use serde::Serialize;

use core_kernel::{CarId, OwnerId};
use domain_vehicle::CarSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: CarId,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: i32,
    pub owner_id: OwnerId,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl From<CarSummary> for CarResponse {
    fn from(car: CarSummary) -> Self {
        Self {
            id: car.id,
            vin: car.vin,
            make: car.make,
            model: car.model,
            year: car.year,
            owner_id: car.owner_id,
            owner_name: car.owner_name,
            owner_email: car.owner_email,
        }
    }
}
