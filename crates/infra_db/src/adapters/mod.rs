//! Domain Adapters
//!
//! PostgreSQL implementations of the domain port traits.
//!
//! ```rust,ignore
//! use infra_db::adapters::{PostgresVehicleAdapter, PostgresPolicyAdapter, PostgresClaimAdapter};
//!
//! let vehicles: Arc<dyn VehiclePort> = Arc::new(PostgresVehicleAdapter::new(pool.clone()));
//! let policies = Arc::new(PostgresPolicyAdapter::new(pool.clone()));
//! let scanner = ExpirationScanner::new(policies.clone(), ScannerConfig::default());
//! ```

pub mod vehicle;
pub mod policy;
pub mod claims;

pub use vehicle::PostgresVehicleAdapter;
pub use policy::{PostgresPolicyAdapter, PostgresExpirationSession};
pub use claims::PostgresClaimAdapter;
