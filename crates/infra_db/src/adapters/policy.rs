//! PostgreSQL Policy Adapter
//!
//! Serves both policy ports. Each expiration session wraps one database
//! transaction: the scan query and the batch update run inside it, `commit`
//! ends it, and dropping an uncommitted session rolls it back and returns the
//! connection to the pool.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::{debug, instrument};

use core_kernel::{CarId, DomainPort, ExpirationWindow, PolicyId, PortError};
use domain_policy::{
    ExpirationSession, ExpirationSessionFactory, ExpiredPolicy, InsurancePolicy, PolicyPort,
};

use crate::error::DatabaseError;
use crate::repositories::PolicyRepository;

#[derive(Debug, Clone)]
pub struct PostgresPolicyAdapter {
    repository: PolicyRepository,
}

impl PostgresPolicyAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PolicyRepository::new(pool),
        }
    }
}

impl DomainPort for PostgresPolicyAdapter {}

#[async_trait]
impl PolicyPort for PostgresPolicyAdapter {
    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
        let rows = self.repository.find_by_car(car_id.value()).await?;
        Ok(rows.into_iter().map(InsurancePolicy::from).collect())
    }
}

#[async_trait]
impl ExpirationSessionFactory for PostgresPolicyAdapter {
    async fn acquire(&self) -> Result<Box<dyn ExpirationSession>, PortError> {
        let tx = self
            .repository
            .pool()
            .begin()
            .await
            .map_err(DatabaseError::from)?;
        debug!("Expiration session opened");
        Ok(Box::new(PostgresExpirationSession { tx: Some(tx) }))
    }
}

/// One scanner cycle's transaction
pub struct PostgresExpirationSession {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PostgresExpirationSession {
    fn transaction(&mut self) -> Result<&mut Transaction<'static, Postgres>, PortError> {
        self.tx
            .as_mut()
            .ok_or_else(|| PortError::internal("expiration session already committed"))
    }
}

#[async_trait]
impl ExpirationSession for PostgresExpirationSession {
    async fn expired_unlogged(
        &mut self,
        window: &ExpirationWindow,
    ) -> Result<Vec<ExpiredPolicy>, PortError> {
        let tx = self.transaction()?;
        let rows = PolicyRepository::expired_unlogged(&mut **tx, window.start, window.end).await?;
        Ok(rows.into_iter().map(ExpiredPolicy::from).collect())
    }

    async fn mark_logged(&mut self, policy_ids: &[PolicyId]) -> Result<u64, PortError> {
        let ids: Vec<i64> = policy_ids.iter().map(|id| id.value()).collect();
        let tx = self.transaction()?;
        Ok(PolicyRepository::mark_expiration_logged(&mut **tx, &ids).await?)
    }

    async fn commit(&mut self) -> Result<(), PortError> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await.map_err(DatabaseError::from)?;
            debug!("Expiration session committed");
        }
        Ok(())
    }
}
