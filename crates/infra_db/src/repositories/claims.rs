//! Claim storage

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use core_kernel::{CarId, ClaimAmount, ClaimId};
use domain_claims::{ClaimDraft, InsuranceClaim};

use crate::error::DatabaseError;

#[derive(Debug, Clone, FromRow)]
pub struct ClaimRow {
    pub id: i64,
    pub car_id: i64,
    pub claim_date: NaiveDate,
    pub description: Option<String>,
    pub amount: Decimal,
}

impl TryFrom<ClaimRow> for InsuranceClaim {
    type Error = DatabaseError;

    fn try_from(row: ClaimRow) -> Result<Self, Self::Error> {
        let amount = ClaimAmount::new(row.amount)
            .map_err(|e| DatabaseError::InvalidRow(format!("claim {}: {}", row.id, e)))?;
        Ok(InsuranceClaim {
            id: ClaimId::new(row.id),
            car_id: CarId::new(row.car_id),
            claim_date: row.claim_date,
            description: row.description,
            amount,
        })
    }
}

/// Repository for insurance claims
///
/// Claims are only ever inserted and read.
#[derive(Debug, Clone)]
pub struct ClaimsRepository {
    pool: PgPool,
}

impl ClaimsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<ClaimRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT id, car_id, claim_date, description, amount
            FROM claims
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert(&self, draft: &ClaimDraft) -> Result<ClaimRow, DatabaseError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO claims (car_id, claim_date, description, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, car_id, claim_date, description, amount
            "#,
        )
        .bind(draft.car_id.value())
        .bind(draft.claim_date)
        .bind(draft.description.as_deref())
        .bind(draft.amount.amount())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(amount: Decimal) -> ClaimRow {
        ClaimRow {
            id: 5,
            car_id: 1,
            claim_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            description: Some("Windshield".to_string()),
            amount,
        }
    }

    #[test]
    fn test_row_converts_to_claim() {
        let claim = InsuranceClaim::try_from(row(dec!(420.00))).unwrap();
        assert_eq!(claim.id, ClaimId::new(5));
        assert_eq!(claim.amount.amount(), dec!(420));
    }

    #[test]
    fn test_negative_amount_row_is_rejected() {
        let error = InsuranceClaim::try_from(row(dec!(-1))).unwrap_err();
        assert!(matches!(error, DatabaseError::InvalidRow(_)));
    }
}
