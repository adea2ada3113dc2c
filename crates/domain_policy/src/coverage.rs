//! Temporal coverage checks
//!
//! A car is insured on a date when at least one of its policies covers that
//! date. Both ends are inclusive, the end instant is compared by its UTC
//! calendar date, and a policy without an end covers every date from its
//! start onward.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, instrument};

use core_kernel::CarId;
use domain_vehicle::VehiclePort;

use crate::error::CoverageError;
use crate::policy::InsurancePolicy;
use crate::ports::PolicyPort;

/// Answers "is this car insured on this date?"
#[derive(Clone)]
pub struct CoverageChecker {
    vehicles: Arc<dyn VehiclePort>,
    policies: Arc<dyn PolicyPort>,
}

impl CoverageChecker {
    pub fn new(vehicles: Arc<dyn VehiclePort>, policies: Arc<dyn PolicyPort>) -> Self {
        Self { vehicles, policies }
    }

    /// Returns true if any policy of the car covers `date`
    ///
    /// # Errors
    ///
    /// * `CoverageError::CarNotFound` if the car is not registered
    /// * `CoverageError::Storage` if a port call fails
    #[instrument(skip(self))]
    pub async fn is_valid(&self, car_id: CarId, date: NaiveDate) -> Result<bool, CoverageError> {
        if !self.vehicles.car_exists(car_id).await? {
            return Err(CoverageError::CarNotFound(car_id));
        }

        let policies = self.policies.policies_for_car(car_id).await?;
        let valid = any_policy_covers(&policies, date);

        debug!(policies = policies.len(), valid, "Coverage evaluated");
        Ok(valid)
    }
}

/// Returns true if any of the policies covers the date
pub fn any_policy_covers(policies: &[InsurancePolicy], date: NaiveDate) -> bool {
    policies.iter().any(|policy| policy.covers(date))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use core_kernel::{CoveragePeriod, PolicyId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_no_policies_never_cover() {
        assert!(!any_policy_covers(&[], date(2025, 6, 1)));
    }

    #[test]
    fn test_gap_between_policies() {
        let first = InsurancePolicy::new(
            PolicyId::new(1),
            CarId::new(1),
            None,
            CoveragePeriod::new(date(2024, 1, 1), Some(Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap())),
        );
        let second = InsurancePolicy::new(
            PolicyId::new(2),
            CarId::new(1),
            None,
            CoveragePeriod::new(date(2024, 8, 1), Some(Utc.with_ymd_and_hms(2024, 12, 31, 0, 0, 0).unwrap())),
        );
        let policies = [first, second];

        assert!(any_policy_covers(&policies, date(2024, 6, 30)));
        assert!(!any_policy_covers(&policies, date(2024, 7, 15)));
        assert!(any_policy_covers(&policies, date(2024, 8, 1)));
    }
}
