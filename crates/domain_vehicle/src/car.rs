//! Cars and the summary view returned by the catalogue

use serde::{Deserialize, Serialize};

use core_kernel::{CarId, OwnerId};
use crate::owner::Owner;

/// A registered vehicle
///
/// The VIN is meant to be unique but the schema does not enforce it; only the
/// demo seeding skips duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub id: CarId,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: OwnerId,
}

/// A car joined with its owner's contact details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarSummary {
    pub id: CarId,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year: i32,
    pub owner_id: OwnerId,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl CarSummary {
    /// Builds a summary from a car and the owner it references
    pub fn new(car: &Car, owner: &Owner) -> Self {
        Self {
            id: car.id,
            vin: car.vin.clone(),
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year_of_manufacture,
            owner_id: owner.id,
            owner_name: owner.name.clone(),
            owner_email: owner.email.clone(),
        }
    }
}
