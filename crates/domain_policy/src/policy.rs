//! Insurance policy entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, CoveragePeriod, PolicyId};
use crate::error::PolicyError;

/// An insurance policy attached to a car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePolicy {
    pub id: PolicyId,
    pub car_id: CarId,
    pub provider: Option<String>,
    pub coverage: CoveragePeriod,
    /// Set once the expiration scanner has reported this policy
    pub expiration_logged: bool,
}

impl InsurancePolicy {
    pub fn new(
        id: PolicyId,
        car_id: CarId,
        provider: Option<String>,
        coverage: CoveragePeriod,
    ) -> Self {
        Self {
            id,
            car_id,
            provider,
            coverage,
            expiration_logged: false,
        }
    }

    /// First covered date
    pub fn start_date(&self) -> NaiveDate {
        self.coverage.start
    }

    /// Instant coverage ends, None for open-ended policies
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.coverage.end
    }

    /// Returns true if the policy covers the given date
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.coverage.covers(date)
    }

    /// Records that the expiration of this policy has been reported
    pub fn mark_expiration_logged(&mut self) -> Result<(), PolicyError> {
        if self.expiration_logged {
            return Err(PolicyError::ExpirationAlreadyLogged(self.id));
        }
        self.expiration_logged = true;
        Ok(())
    }
}
