//! Owner and car storage

use sqlx::{FromRow, PgExecutor, PgPool};

use core_kernel::{CarId, OwnerId};
use domain_vehicle::{Car, CarSummary, Owner};

use crate::error::DatabaseError;

#[derive(Debug, Clone, FromRow)]
pub struct OwnerRow {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, FromRow)]
pub struct CarRow {
    pub id: i64,
    pub vin: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub year_of_manufacture: i32,
    pub owner_id: i64,
}

/// A car joined with its owner
#[derive(Debug, Clone, FromRow)]
pub struct CarWithOwnerRow {
    #[sqlx(flatten)]
    pub car: CarRow,
    pub owner_name: String,
    pub owner_email: Option<String>,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner::new(OwnerId::new(row.id), row.name, row.email)
    }
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: CarId::new(row.id),
            vin: row.vin,
            make: row.make,
            model: row.model,
            year_of_manufacture: row.year_of_manufacture,
            owner_id: OwnerId::new(row.owner_id),
        }
    }
}

impl From<CarWithOwnerRow> for CarSummary {
    fn from(row: CarWithOwnerRow) -> Self {
        let owner = Owner::new(OwnerId::new(row.car.owner_id), row.owner_name, row.owner_email);
        CarSummary::new(&Car::from(row.car), &owner)
    }
}

/// Repository for owners and cars
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn car_exists(&self, car_id: i64) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM cars WHERE id = $1)")
            .bind(car_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// All cars with their owners, ordered by car id
    pub async fn list_with_owners(&self) -> Result<Vec<CarWithOwnerRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, CarWithOwnerRow>(
            r#"
            SELECT
                c.id,
                c.vin,
                c.make,
                c.model,
                c.year_of_manufacture,
                c.owner_id,
                o.name AS owner_name,
                o.email AS owner_email
            FROM cars c
            JOIN owners o ON o.id = c.owner_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn count_owners<'e>(executor: impl PgExecutor<'e>) -> Result<i64, DatabaseError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM owners")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    pub async fn insert_owner<'e>(
        executor: impl PgExecutor<'e>,
        name: &str,
        email: Option<&str>,
    ) -> Result<OwnerRow, DatabaseError> {
        let row = sqlx::query_as::<_, OwnerRow>(
            "INSERT INTO owners (name, email) VALUES ($1, $2) RETURNING id, name, email",
        )
        .bind(name)
        .bind(email)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    pub async fn find_car_by_vin<'e>(
        executor: impl PgExecutor<'e>,
        vin: &str,
    ) -> Result<Option<CarRow>, DatabaseError> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            SELECT id, vin, make, model, year_of_manufacture, owner_id
            FROM cars
            WHERE vin = $1
            ORDER BY id
            LIMIT 1
            "#,
        )
        .bind(vin)
        .fetch_optional(executor)
        .await?;
        Ok(row)
    }

    pub async fn insert_car<'e>(
        executor: impl PgExecutor<'e>,
        vin: &str,
        make: Option<&str>,
        model: Option<&str>,
        year_of_manufacture: i32,
        owner_id: i64,
    ) -> Result<CarRow, DatabaseError> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            INSERT INTO cars (vin, make, model, year_of_manufacture, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, vin, make, model, year_of_manufacture, owner_id
            "#,
        )
        .bind(vin)
        .bind(make)
        .bind(model)
        .bind(year_of_manufacture)
        .bind(owner_id)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }
}
