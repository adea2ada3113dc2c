//! Pre-built Test Fixtures
//!
//! The reference data mirrors the demo seed: Ana Pop owns a Dacia Logan
//! insured through 2025, Bogdan Ionescu owns an uninsured VW Golf.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{CarId, CoveragePeriod, PolicyId};
use domain_claims::ports::mock::MockClaimStore;
use domain_claims::ClaimRegistrar;
use domain_history::HistoryService;
use domain_policy::ports::mock::MockPolicyStore;
use domain_policy::CoverageChecker;
use domain_vehicle::ports::mock::MockVehiclePort;
use domain_vehicle::CarCatalogue;

/// Fixed dates used by coverage and scanner tests
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// First covered day of the reference policy
    pub fn coverage_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    /// End instant of the reference policy
    pub fn coverage_end() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 31, 0, 0, 0).unwrap()
    }

    /// First day after the reference policy
    pub fn after_coverage() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
    }

    /// A scan time shortly after the seeded policies end
    pub fn scan_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, 30, 17, 30, 0).unwrap()
    }

    pub fn reference_period() -> CoveragePeriod {
        CoveragePeriod::new(Self::coverage_start(), Some(Self::coverage_end()))
    }
}

/// In-memory ports loaded with the reference owners, cars and policy
pub struct MockWorld {
    pub vehicles: Arc<MockVehiclePort>,
    pub policies: Arc<MockPolicyStore>,
    pub claims: Arc<MockClaimStore>,
    /// Ana's Dacia, insured from 2025-01-01 to 2025-12-31
    pub insured_car: CarId,
    /// Bogdan's Golf, no policies
    pub uninsured_car: CarId,
    pub reference_policy: PolicyId,
}

impl MockWorld {
    pub async fn new() -> Self {
        let vehicles = Arc::new(MockVehiclePort::new());
        let policies = Arc::new(MockPolicyStore::new());
        let claims = Arc::new(MockClaimStore::new());

        let ana = vehicles.add_owner("Ana Pop", Some("ana.pop@example.com")).await;
        let bogdan = vehicles
            .add_owner("Bogdan Ionescu", Some("bogdan.ionescu@example.com"))
            .await;
        let insured_car = vehicles.add_car(ana, "VIN12345", "Dacia", "Logan", 2018).await;
        let uninsured_car = vehicles.add_car(bogdan, "VIN67890", "VW", "Golf", 2021).await;
        let reference_policy = policies
            .add_policy(insured_car, "VIN12345", "Allianz", TemporalFixtures::reference_period())
            .await;

        Self {
            vehicles,
            policies,
            claims,
            insured_car,
            uninsured_car,
            reference_policy,
        }
    }

    pub fn catalogue(&self) -> CarCatalogue {
        CarCatalogue::new(self.vehicles.clone())
    }

    pub fn coverage_checker(&self) -> CoverageChecker {
        CoverageChecker::new(self.vehicles.clone(), self.policies.clone())
    }

    pub fn claim_registrar(&self) -> ClaimRegistrar {
        ClaimRegistrar::new(self.vehicles.clone(), self.claims.clone())
    }

    pub fn history_service(&self) -> HistoryService {
        HistoryService::new(self.vehicles.clone(), self.policies.clone(), self.claims.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_world_reference_data() {
        let world = MockWorld::new().await;
        let checker = world.coverage_checker();

        assert!(checker.is_valid(world.insured_car, TemporalFixtures::coverage_start()).await.unwrap());
        assert!(!checker.is_valid(world.uninsured_car, TemporalFixtures::coverage_start()).await.unwrap());
        assert_eq!(world.catalogue().list_cars().await.unwrap().len(), 2);
    }
}
