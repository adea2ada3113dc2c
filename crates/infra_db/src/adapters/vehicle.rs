//! PostgreSQL Vehicle Adapter
//!
//! Implements `VehiclePort` on top of `VehicleRepository`. It also serves as
//! the database readiness check through `HealthCheckable`.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{AdapterHealth, CarId, DomainPort, HealthCheckResult, HealthCheckable, PortError};
use domain_vehicle::{CarSummary, VehiclePort};

use crate::repositories::VehicleRepository;

const ADAPTER_ID: &str = "postgres-vehicle-adapter";

/// PostgreSQL-backed implementation of the VehiclePort trait
#[derive(Debug, Clone)]
pub struct PostgresVehicleAdapter {
    repository: VehicleRepository,
    pool: PgPool,
}

impl PostgresVehicleAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool.clone()),
            pool,
        }
    }
}

impl DomainPort for PostgresVehicleAdapter {}

#[async_trait]
impl HealthCheckable for PostgresVehicleAdapter {
    /// Runs `SELECT 1` against the pool
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();

        let result = sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await;

        let latency_ms = start.elapsed().as_millis() as u64;
        let (status, message) = match result {
            Ok(_) => (AdapterHealth::Healthy, None),
            Err(e) => (AdapterHealth::Unhealthy, Some(format!("Database error: {}", e))),
        };

        HealthCheckResult {
            adapter_id: ADAPTER_ID.to_string(),
            status,
            latency_ms,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl VehiclePort for PostgresVehicleAdapter {
    #[instrument(skip(self), fields(car_id = %car_id))]
    async fn car_exists(&self, car_id: CarId) -> Result<bool, PortError> {
        Ok(self.repository.car_exists(car_id.value()).await?)
    }

    #[instrument(skip(self))]
    async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError> {
        let rows = self.repository.list_with_owners().await?;
        debug!(count = rows.len(), "Loaded cars");
        Ok(rows.into_iter().map(CarSummary::from).collect())
    }
}
