//! Claims DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use core_kernel::{ClaimAmount, ClaimId};
use domain_claims::InsuranceClaim;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClaimRequest {
    #[validate(required(message = "claimDate is required"))]
    pub claim_date: Option<NaiveDate>,
    pub description: Option<String>,
    #[validate(custom(function = "validate_claim_amount"))]
    pub amount: Decimal,
}

fn validate_claim_amount(amount: &Decimal) -> Result<(), ValidationError> {
    ClaimAmount::new(*amount).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("range");
        error.message = Some(e.to_string().into());
        error
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

impl From<InsuranceClaim> for ClaimResponse {
    fn from(claim: InsuranceClaim) -> Self {
        Self {
            id: claim.id,
            claim_date: claim.claim_date,
            description: claim.description,
            amount: claim.amount.amount(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn request(claim_date: Option<NaiveDate>, amount: Decimal) -> CreateClaimRequest {
        CreateClaimRequest {
            claim_date,
            description: None,
            amount,
        }
    }

    #[test]
    fn test_valid_request() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10);
        assert!(request(date, dec!(0)).validate().is_ok());
        assert!(request(date, dec!(1250.50)).validate().is_ok());
    }

    #[test]
    fn test_missing_date_and_negative_amount() {
        let errors = request(None, dec!(-5)).validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("claim_date"));
        assert!(fields.contains_key("amount"));
    }

    #[test]
    fn test_amount_must_fit_storage() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 10);

        let precise = request(date, dec!(10.005)).validate().unwrap_err();
        assert!(precise.field_errors().contains_key("amount"));

        let huge = request(date, dec!(100000000000000000)).validate().unwrap_err();
        assert!(huge.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_response_amount_is_a_number() {
        let response = ClaimResponse {
            id: ClaimId::new(1),
            claim_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            description: None,
            amount: dec!(1250.5),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["amount"], serde_json::json!(1250.5));
        assert_eq!(json["claimDate"], "2025-02-10");
    }
}
