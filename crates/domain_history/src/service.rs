//! Car history lookup

use std::sync::Arc;

use tracing::{debug, instrument};

use core_kernel::CarId;
use domain_claims::ClaimPort;
use domain_policy::PolicyPort;
use domain_vehicle::VehiclePort;

use crate::error::HistoryError;
use crate::event::CarHistory;
use crate::merge::merge_history;

/// Loads a car's policies and claims and merges them
#[derive(Clone)]
pub struct HistoryService {
    vehicles: Arc<dyn VehiclePort>,
    policies: Arc<dyn PolicyPort>,
    claims: Arc<dyn ClaimPort>,
}

impl HistoryService {
    pub fn new(
        vehicles: Arc<dyn VehiclePort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimPort>,
    ) -> Self {
        Self {
            vehicles,
            policies,
            claims,
        }
    }

    /// Returns the car's timeline in ascending date order
    ///
    /// # Errors
    ///
    /// * `HistoryError::CarNotFound` if the car is not registered
    /// * `HistoryError::Storage` if a port call fails
    #[instrument(skip(self))]
    pub async fn history(&self, car_id: CarId) -> Result<CarHistory, HistoryError> {
        if !self.vehicles.car_exists(car_id).await? {
            return Err(HistoryError::CarNotFound(car_id));
        }

        let policies = self.policies.policies_for_car(car_id).await?;
        let claims = self.claims.claims_for_car(car_id).await?;
        let events = merge_history(&policies, &claims);

        debug!(policies = policies.len(), claims = claims.len(), "History merged");
        Ok(CarHistory { car_id, events })
    }
}
