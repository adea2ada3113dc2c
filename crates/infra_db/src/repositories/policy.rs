//! Policy storage

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgExecutor, PgPool};

use core_kernel::{CarId, CoveragePeriod, PolicyId};
use domain_policy::{ExpiredPolicy, InsurancePolicy};

use crate::error::DatabaseError;

#[derive(Debug, Clone, FromRow)]
pub struct PolicyRow {
    pub id: i64,
    pub car_id: i64,
    pub provider: Option<String>,
    pub start_date: NaiveDate,
    pub end_at: Option<DateTime<Utc>>,
    pub expiration_logged: bool,
}

impl From<PolicyRow> for InsurancePolicy {
    fn from(row: PolicyRow) -> Self {
        let mut policy = InsurancePolicy::new(
            PolicyId::new(row.id),
            CarId::new(row.car_id),
            row.provider,
            CoveragePeriod::new(row.start_date, row.end_at),
        );
        policy.expiration_logged = row.expiration_logged;
        policy
    }
}

/// A policy that ended inside a scan window, with its car's VIN
#[derive(Debug, Clone, FromRow)]
pub struct ExpiredPolicyRow {
    pub policy_id: i64,
    pub car_id: i64,
    pub vin: String,
    pub expired_at: DateTime<Utc>,
}

impl From<ExpiredPolicyRow> for ExpiredPolicy {
    fn from(row: ExpiredPolicyRow) -> Self {
        ExpiredPolicy {
            policy_id: PolicyId::new(row.policy_id),
            car_id: CarId::new(row.car_id),
            vin: row.vin,
            expired_at: row.expired_at,
        }
    }
}

/// Values for a policy insert
#[derive(Debug, Clone)]
pub struct NewPolicyRow<'a> {
    pub car_id: i64,
    pub provider: Option<&'a str>,
    pub start_date: NaiveDate,
    pub end_at: Option<DateTime<Utc>>,
}

/// Repository for insurance policies
#[derive(Debug, Clone)]
pub struct PolicyRepository {
    pool: PgPool,
}

impl PolicyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn find_by_car(&self, car_id: i64) -> Result<Vec<PolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT id, car_id, provider, start_date, end_at, expiration_logged
            FROM policies
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn insert<'e>(
        executor: impl PgExecutor<'e>,
        policy: &NewPolicyRow<'_>,
    ) -> Result<PolicyRow, DatabaseError> {
        let row = sqlx::query_as::<_, PolicyRow>(
            r#"
            INSERT INTO policies (car_id, provider, start_date, end_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, car_id, provider, start_date, end_at, expiration_logged
            "#,
        )
        .bind(policy.car_id)
        .bind(policy.provider)
        .bind(policy.start_date)
        .bind(policy.end_at)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    /// Unflagged policies whose end lies in `[window_start, window_end]`
    ///
    /// The selected rows are locked until the surrounding transaction ends, so
    /// two scanners sharing a database cannot both report the same policy.
    pub async fn expired_unlogged<'e>(
        executor: impl PgExecutor<'e>,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
    ) -> Result<Vec<ExpiredPolicyRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, ExpiredPolicyRow>(
            r#"
            SELECT p.id AS policy_id, p.car_id, c.vin, p.end_at AS expired_at
            FROM policies p
            JOIN cars c ON c.id = p.car_id
            WHERE p.end_at IS NOT NULL
              AND p.end_at <= $2
              AND p.end_at >= $1
              AND NOT p.expiration_logged
            ORDER BY p.end_at, p.id
            FOR UPDATE OF p
            "#,
        )
        .bind(window_start)
        .bind(window_end)
        .fetch_all(executor)
        .await?;
        Ok(rows)
    }

    /// Flags the policies in one statement, returning the number of rows changed
    pub async fn mark_expiration_logged<'e>(
        executor: impl PgExecutor<'e>,
        policy_ids: &[i64],
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query(
            "UPDATE policies SET expiration_logged = TRUE WHERE id = ANY($1) AND NOT expiration_logged",
        )
        .bind(policy_ids)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
