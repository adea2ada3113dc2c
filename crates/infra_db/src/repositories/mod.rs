//! Repository implementations
//!
//! Repositories encapsulate the SQL for one table group and return plain row
//! structs. Queries are built at runtime with `sqlx::query_as` and rows are
//! decoded through `FromRow`, so the crate builds without a live database.
//!
//! Writes that must share a transaction take any `PgExecutor` instead of
//! using the repository's pool.

pub mod vehicle;
pub mod policy;
pub mod claims;

pub use vehicle::{VehicleRepository, OwnerRow, CarRow, CarWithOwnerRow};
pub use policy::{PolicyRepository, PolicyRow, ExpiredPolicyRow, NewPolicyRow};
pub use claims::{ClaimsRepository, ClaimRow};
