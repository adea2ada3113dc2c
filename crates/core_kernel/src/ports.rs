//! Ports and Adapters Infrastructure
//!
//! Every domain crate declares the storage operations it needs as an async
//! port trait. Adapters implement those traits either against PostgreSQL
//! (`infra_db`) or in memory (the `mock` modules used by tests).
//!
//! ```text
//!   handlers / scanner
//!          │
//!          ▼
//!   domain services ──► port traits (VehiclePort, PolicyPort, ClaimPort, ...)
//!                              ▲                    ▲
//!                              │                    │
//!                     Postgres adapter       in-memory mock
//! ```

use std::fmt;
use thiserror::Error;
use serde::{Deserialize, Serialize};

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Failure reported by a port
///
/// Postgres and in-memory adapters both speak this type, so services and
/// handlers never see driver errors. Only `Connection` is worth retrying.
#[derive(Debug, Error)]
pub enum PortError {
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The store refused the data, e.g. a violated constraint
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The store could not be reached or had no free connection
    #[error("Connection error: {message}")]
    Connection {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        PortError::Validation { message: message.into() }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection { message: message.into(), source: None }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal { message: message.into(), source: None }
    }

    /// Wraps an underlying error, keeping it reachable through `source()`
    pub fn connection_from<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PortError::Connection {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// Like `connection_from`, for failures a retry will not fix
    pub fn internal_from<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PortError::Internal {
            message: error.to_string(),
            source: Some(Box::new(error)),
        }
    }

    /// A later attempt may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, PortError::Connection { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// Ports are shared between request tasks and the background scanner, so
/// they must be thread-safe and live for the whole process.
pub trait DomainPort: Send + Sync + 'static {}

/// Whether an adapter can currently serve requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Outcome of one health check, reported by the readiness endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Round trip of the check
    pub latency_ms: u64,
    /// Failure detail when unhealthy
    pub message: Option<String>,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

impl HealthCheckResult {
    /// Returns true if the adapter reported itself healthy
    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Implemented by adapters that can check their backing store
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    async fn health_check(&self) -> HealthCheckResult;
}
