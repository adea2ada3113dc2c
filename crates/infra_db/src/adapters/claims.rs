//! PostgreSQL Claim Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{CarId, DomainPort, PortError};
use domain_claims::{ClaimDraft, ClaimPort, InsuranceClaim};

use crate::error::DatabaseError;
use crate::repositories::ClaimsRepository;

#[derive(Debug, Clone)]
pub struct PostgresClaimAdapter {
    repository: ClaimsRepository,
}

impl PostgresClaimAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClaimsRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresClaimAdapter {}

#[async_trait]
impl ClaimPort for PostgresClaimAdapter {
    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
        let rows = self.repository.find_by_car(car_id.value()).await?;
        let claims = rows
            .into_iter()
            .map(InsuranceClaim::try_from)
            .collect::<Result<Vec<_>, DatabaseError>>()?;
        Ok(claims)
    }

    #[instrument(skip(self, draft), fields(car_id = %draft.car_id))]
    async fn append_claim(&self, draft: ClaimDraft) -> Result<InsuranceClaim, PortError> {
        let row = self.repository.insert(&draft).await?;
        Ok(InsuranceClaim::try_from(row)?)
    }
}
