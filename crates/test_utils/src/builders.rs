//! Test Data Builders
//!
//! Builders for policies and claims that only need the fields a test cares
//! about.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{CarId, CoveragePeriod, PolicyId};
use domain_claims::NewClaim;
use domain_policy::ports::mock::MockPolicyStore;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::fixtures::TemporalFixtures;

/// Builder for policies stored in a `MockPolicyStore`
pub struct PolicyBuilder {
    car_id: CarId,
    vin: String,
    provider: String,
    start: NaiveDate,
    end: Option<DateTime<Utc>>,
}

impl PolicyBuilder {
    pub fn for_car(car_id: CarId, vin: impl Into<String>) -> Self {
        Self {
            car_id,
            vin: vin.into(),
            provider: "Allianz".to_string(),
            start: TemporalFixtures::coverage_start(),
            end: Some(TemporalFixtures::coverage_end()),
        }
    }

    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn starting(mut self, start: NaiveDate) -> Self {
        self.start = start;
        self
    }

    pub fn ending_at(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn open_ended(mut self) -> Self {
        self.end = None;
        self
    }

    pub fn period(&self) -> CoveragePeriod {
        CoveragePeriod::new(self.start, self.end)
    }

    /// Stores the policy and returns its id
    pub async fn insert_into(self, store: &MockPolicyStore) -> PolicyId {
        let period = self.period();
        store.add_policy(self.car_id, &self.vin, &self.provider, period).await
    }
}

/// Builder for claim submissions
pub struct ClaimBuilder {
    claim_date: NaiveDate,
    description: Option<String>,
    amount: Decimal,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    pub fn new() -> Self {
        Self {
            claim_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            description: Some("Rear bumper".to_string()),
            amount: dec!(1250.50),
        }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.claim_date = date;
        self
    }

    pub fn description(mut self, description: Option<&str>) -> Self {
        self.description = description.map(str::to_string);
        self
    }

    pub fn amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn build(self) -> NewClaim {
        NewClaim::new(self.claim_date, self.description, self.amount)
    }
}
