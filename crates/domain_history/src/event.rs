//! Timeline events

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, ClaimAmount, ClaimId, PolicyId};
use domain_claims::InsuranceClaim;
use domain_policy::InsurancePolicy;

/// Kind label of policy events
pub const POLICY_EVENT: &str = "Insurance Policy";

/// Kind label of claim events
pub const CLAIM_EVENT: &str = "Insurance Claim";

/// One entry of a car's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// A policy, dated by the start of its coverage
    Policy {
        policy_id: PolicyId,
        date: NaiveDate,
        provider: Option<String>,
        end: Option<DateTime<Utc>>,
    },

    /// A claim, dated by its claim date
    Claim {
        claim_id: ClaimId,
        date: NaiveDate,
        description: Option<String>,
        amount: ClaimAmount,
    },
}

impl HistoryEvent {
    /// The date the timeline is ordered by
    pub fn date(&self) -> NaiveDate {
        match self {
            HistoryEvent::Policy { date, .. } | HistoryEvent::Claim { date, .. } => *date,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            HistoryEvent::Policy { .. } => POLICY_EVENT,
            HistoryEvent::Claim { .. } => CLAIM_EVENT,
        }
    }
}

impl From<&InsurancePolicy> for HistoryEvent {
    fn from(policy: &InsurancePolicy) -> Self {
        HistoryEvent::Policy {
            policy_id: policy.id,
            date: policy.start_date(),
            provider: policy.provider.clone(),
            end: policy.end(),
        }
    }
}

impl From<&InsuranceClaim> for HistoryEvent {
    fn from(claim: &InsuranceClaim) -> Self {
        HistoryEvent::Claim {
            claim_id: claim.id,
            date: claim.claim_date,
            description: claim.description.clone(),
            amount: claim.amount,
        }
    }
}

/// The full timeline of one car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarHistory {
    pub car_id: CarId,
    pub events: Vec<HistoryEvent>,
}
