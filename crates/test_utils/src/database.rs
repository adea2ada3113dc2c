//! Database Test Utilities
//!
//! Starts a throwaway PostgreSQL container, applies the schema and hands out
//! a pool. Tests using it need Docker and are marked `#[ignore]`.

use std::time::Duration;

use infra_db::{apply_schema, create_pool, DatabaseConfig};
use sqlx::PgPool;
use testcontainers::{
    core::{IntoContainerPort, WaitFor},
    runners::AsyncRunner,
    ContainerAsync, GenericImage, ImageExt,
};

const POSTGRES_PORT: u16 = 5432;
const CREDENTIALS: (&str, &str) = ("insurance", "insurance");
const DATABASE: &str = "car_insurance_test";
const READY_LINE: &str = "database system is ready to accept connections";

pub type TestResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Builds the URL of a database exposed on `host:port`
pub fn test_database_url(host: &str, port: u16) -> String {
    let (user, password) = CREDENTIALS;
    format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, DATABASE)
}

/// A PostgreSQL container with the schema applied
///
/// The container stops when this value is dropped.
pub struct TestDatabase {
    _container: ContainerAsync<GenericImage>,
    pub url: String,
    pub pool: PgPool,
}

impl TestDatabase {
    pub async fn new() -> TestResult<Self> {
        let (user, password) = CREDENTIALS;
        let container = GenericImage::new("postgres", "16-alpine")
            .with_exposed_port(POSTGRES_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr(READY_LINE))
            .with_env_var("POSTGRES_USER", user)
            .with_env_var("POSTGRES_PASSWORD", password)
            .with_env_var("POSTGRES_DB", DATABASE)
            .start()
            .await?;

        let host = container.get_host().await?.to_string();
        let port = container.get_host_port_ipv4(POSTGRES_PORT).await?;
        let url = test_database_url(&host, port);

        let config = DatabaseConfig::new(url.clone())
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30));
        let pool = create_pool(&config).await?;
        apply_schema(&pool).await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Removes all rows and resets id sequences, keeping the schema
    pub async fn clear_data(&self) -> TestResult<()> {
        sqlx::query("TRUNCATE TABLE claims, policies, cars, owners RESTART IDENTITY CASCADE")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
