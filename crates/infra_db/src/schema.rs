//! Schema setup
//!
//! The schema script is idempotent, so it is applied on every start.

use sqlx::PgPool;
use tracing::info;

use crate::error::DatabaseError;

/// The DDL for owners, cars, policies and claims
pub const SCHEMA_SQL: &str = include_str!("../../../migrations/20250101_000001_initial_schema.sql");

/// Creates any missing tables and indexes
pub async fn apply_schema(pool: &PgPool) -> Result<(), DatabaseError> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::SchemaFailed(e.to_string()))?;
    info!("Database schema ready");
    Ok(())
}
