//! Insurance claim records

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CarId, ClaimAmount, ClaimId};

/// A persisted claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsuranceClaim {
    pub id: ClaimId,
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: ClaimAmount,
}

/// Claim details as submitted by a caller, not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Decimal,
}

impl NewClaim {
    pub fn new(claim_date: NaiveDate, description: Option<String>, amount: Decimal) -> Self {
        Self {
            claim_date,
            description,
            amount,
        }
    }
}

/// A validated claim ready to be stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimDraft {
    pub car_id: CarId,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: ClaimAmount,
}

impl ClaimDraft {
    /// Attaches the identity generated by storage
    pub fn into_claim(self, id: ClaimId) -> InsuranceClaim {
        InsuranceClaim {
            id,
            car_id: self.car_id,
            claim_date: self.claim_date,
            description: self.description,
            amount: self.amount,
        }
    }
}
