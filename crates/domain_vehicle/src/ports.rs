//! Vehicle Domain Ports
//!
//! The `VehiclePort` trait is everything the service needs to know about
//! owners and cars. Two adapters implement it:
//!
//! - **Internal Adapter**: PostgreSQL via `infra_db`
//! - **Mock Adapter**: in-memory, for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_vehicle::VehiclePort;
//!
//! if !vehicles.car_exists(car_id).await? {
//!     return Err(CoverageError::CarNotFound(car_id));
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{CarId, DomainPort, HealthCheckable, PortError};

use crate::car::CarSummary;

/// Port for owner and car lookups
#[async_trait]
pub trait VehiclePort: DomainPort + HealthCheckable {
    /// Returns true if a car with the given id is registered
    async fn car_exists(&self, car_id: CarId) -> Result<bool, PortError>;

    /// Lists all cars with their owner details
    async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError>;
}

/// Mock implementation of VehiclePort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult, OwnerId};
    use crate::car::Car;
    use crate::owner::Owner;

    /// In-memory mock implementation of VehiclePort
    #[derive(Debug, Default)]
    pub struct MockVehiclePort {
        owners: Arc<RwLock<BTreeMap<OwnerId, Owner>>>,
        cars: Arc<RwLock<BTreeMap<CarId, Car>>>,
        next_id: AtomicI64,
        unavailable: AtomicBool,
    }

    impl MockVehiclePort {
        /// Creates a new, empty mock port
        pub fn new() -> Self {
            Self::default()
        }

        fn next_id(&self) -> i64 {
            self.next_id.fetch_add(1, Ordering::SeqCst) + 1
        }

        /// Registers an owner and returns its id
        pub async fn add_owner(&self, name: &str, email: Option<&str>) -> OwnerId {
            let id = OwnerId::new(self.next_id());
            let owner = Owner::new(id, name, email.map(str::to_string));
            self.owners.write().await.insert(id, owner);
            id
        }

        /// Registers a car for an existing owner and returns its id
        pub async fn add_car(
            &self,
            owner_id: OwnerId,
            vin: &str,
            make: &str,
            model: &str,
            year_of_manufacture: i32,
        ) -> CarId {
            let id = CarId::new(self.next_id());
            let car = Car {
                id,
                vin: vin.to_string(),
                make: Some(make.to_string()),
                model: Some(model.to_string()),
                year_of_manufacture,
                owner_id,
            };
            self.cars.write().await.insert(id, car);
            id
        }

        /// Makes every subsequent call fail with a connection error
        pub fn set_unavailable(&self, unavailable: bool) {
            self.unavailable.store(unavailable, Ordering::SeqCst);
        }

        fn check_available(&self) -> Result<(), PortError> {
            if self.unavailable.load(Ordering::SeqCst) {
                Err(PortError::connection("mock vehicle store unavailable"))
            } else {
                Ok(())
            }
        }
    }

    impl DomainPort for MockVehiclePort {}

    #[async_trait]
    impl HealthCheckable for MockVehiclePort {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.unavailable.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult {
                adapter_id: "mock-vehicle-port".to_string(),
                status,
                latency_ms: 0,
                message: None,
                checked_at: Utc::now(),
            }
        }
    }

    #[async_trait]
    impl VehiclePort for MockVehiclePort {
        async fn car_exists(&self, car_id: CarId) -> Result<bool, PortError> {
            self.check_available()?;
            Ok(self.cars.read().await.contains_key(&car_id))
        }

        async fn list_cars(&self) -> Result<Vec<CarSummary>, PortError> {
            self.check_available()?;
            let owners = self.owners.read().await;
            self.cars
                .read()
                .await
                .values()
                .map(|car| {
                    owners
                        .get(&car.owner_id)
                        .map(|owner| CarSummary::new(car, owner))
                        .ok_or_else(|| PortError::not_found(OwnerId::entity(), car.owner_id))
                })
                .collect()
        }
    }
}
