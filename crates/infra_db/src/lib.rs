//! Infrastructure Database Layer
//!
//! PostgreSQL storage for owners, cars, policies and claims, accessed through
//! SQLx.
//!
//! # Architecture
//!
//! Repositories own the SQL and map rows to plain row structs. Adapters sit on
//! top of them and implement the domain port traits, translating rows into
//! domain types and `DatabaseError` into `PortError`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, apply_schema, DatabaseConfig};
//! use infra_db::adapters::PostgresVehicleAdapter;
//!
//! let pool = create_pool(&DatabaseConfig::new(url)).await?;
//! apply_schema(&pool).await?;
//! let vehicles = PostgresVehicleAdapter::new(pool.clone());
//! ```

pub mod pool;
pub mod error;
pub mod schema;
pub mod repositories;
pub mod adapters;
pub mod seed;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use schema::apply_schema;
pub use seed::{seed_demo_data, SeedReport};
