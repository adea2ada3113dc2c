//! Database error types

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Connection pool exhausted or closed
    #[error("Connection pool unavailable: {0}")]
    PoolUnavailable(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: String, id: String },

    /// Foreign key constraint violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Check or unique constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A row could not be turned into a domain value
    #[error("Invalid row: {0}")]
    InvalidRow(String),

    /// Schema setup failed
    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),
}

impl DatabaseError {
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::ForeignKeyViolation(_) | DatabaseError::ConstraintViolation(_)
        )
    }

    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolUnavailable(_)
        )
    }
}

/// Maps SQLx errors by PostgreSQL error code
///
/// See <https://www.postgresql.org/docs/current/errcodes-appendix.html>
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::not_found("Record", "unknown"),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                DatabaseError::PoolUnavailable(error.to_string())
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some("23503") => DatabaseError::ForeignKeyViolation(message),
                    Some("23505") | Some("23514") => DatabaseError::ConstraintViolation(message),
                    // numeric_value_out_of_range, e.g. an amount too wide for its column
                    Some("22003") => DatabaseError::ConstraintViolation(message),
                    // Class 08: connection exception
                    Some(code) if code.starts_with("08") => DatabaseError::ConnectionFailed(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::InvalidRow(error.to_string())
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

/// Connection problems become transient port errors, so the expiration
/// scanner treats them as a skipped cycle.
impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound { entity, id } => PortError::NotFound {
                entity_type: entity,
                id,
            },
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolUnavailable(_) => {
                PortError::connection_from(error)
            }
            DatabaseError::ForeignKeyViolation(_) | DatabaseError::ConstraintViolation(_) => {
                PortError::validation(error.to_string())
            }
            _ => PortError::internal_from(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_transient() {
        let port: PortError = DatabaseError::from(sqlx::Error::PoolTimedOut).into();
        assert!(port.is_transient());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error = DatabaseError::from(sqlx::Error::RowNotFound);
        assert!(error.is_not_found());
        assert!(PortError::from(error).is_not_found());
    }

    #[test]
    fn test_constraint_violation_is_validation() {
        let port = PortError::from(DatabaseError::ConstraintViolation("chk_claim_amount".into()));
        assert!(matches!(port, PortError::Validation { .. }));
        assert!(!port.is_transient());
    }

    #[test]
    fn test_invalid_row_is_internal() {
        let port = PortError::from(DatabaseError::InvalidRow("negative amount".into()));
        assert!(matches!(port, PortError::Internal { .. }));
    }

    #[test]
    fn test_not_found_message() {
        let error = DatabaseError::not_found("Car", 42);
        assert_eq!(error.to_string(), "Car with id '42' not found");
    }
}
