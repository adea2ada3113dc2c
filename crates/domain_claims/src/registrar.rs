//! Claim registration

use std::sync::Arc;

use tracing::{info, instrument};

use core_kernel::{CarId, ClaimAmount};
use domain_vehicle::VehiclePort;

use crate::claim::{ClaimDraft, InsuranceClaim, NewClaim};
use crate::error::ClaimError;
use crate::ports::ClaimPort;

/// Appends claims to a car's timeline
#[derive(Clone)]
pub struct ClaimRegistrar {
    vehicles: Arc<dyn VehiclePort>,
    claims: Arc<dyn ClaimPort>,
}

impl ClaimRegistrar {
    pub fn new(vehicles: Arc<dyn VehiclePort>, claims: Arc<dyn ClaimPort>) -> Self {
        Self { vehicles, claims }
    }

    /// Validates and stores a new claim, returning the persisted record
    ///
    /// The amount is checked here even though the HTTP layer validates it
    /// too, so no caller can store a negative amount.
    ///
    /// # Errors
    ///
    /// * `ClaimError::InvalidAmount` if the amount is negative
    /// * `ClaimError::CarNotFound` if the car is not registered
    /// * `ClaimError::Storage` if a port call fails
    #[instrument(skip(self, claim), fields(claim_date = %claim.claim_date))]
    pub async fn register(&self, car_id: CarId, claim: NewClaim) -> Result<InsuranceClaim, ClaimError> {
        let amount = ClaimAmount::new(claim.amount)?;

        if !self.vehicles.car_exists(car_id).await? {
            return Err(ClaimError::CarNotFound(car_id));
        }

        let draft = ClaimDraft {
            car_id,
            claim_date: claim.claim_date,
            description: claim.description,
            amount,
        };
        let stored = self.claims.append_claim(draft).await?;

        info!(claim_id = %stored.id, amount = %stored.amount, "Claim registered");
        Ok(stored)
    }
}
