//! Demo data
//!
//! Populates an empty database with two owners, their cars and a few
//! policies ending on 2025-08-30. Nothing is written if any owner exists.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::error::DatabaseError;
use crate::repositories::{NewPolicyRow, PolicyRepository, VehicleRepository};

/// What a seeding run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub owners: usize,
    pub cars: usize,
    pub policies: usize,
    /// VINs skipped because a car with the same VIN already existed
    pub skipped_vins: Vec<String>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.owners == 0 && self.cars == 0 && self.policies == 0
    }
}

struct DemoCar {
    vin: &'static str,
    make: &'static str,
    model: &'static str,
    year: i32,
    owner: usize,
}

const DEMO_CARS: [DemoCar; 3] = [
    DemoCar { vin: "VIN12345", make: "Dacia", model: "Logan", year: 2018, owner: 0 },
    DemoCar { vin: "VIN67890", make: "VW", model: "Golf", year: 2021, owner: 1 },
    DemoCar { vin: "VIN67890", make: "VW", model: "Passat", year: 2020, owner: 1 },
];

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> Result<DateTime<Utc>, DatabaseError> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0)
        .single()
        .ok_or_else(|| DatabaseError::InvalidRow(format!("invalid seed timestamp {y}-{m}-{d} {h}:{min}")))
}

fn day(y: i32, m: u32, d: u32) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| DatabaseError::InvalidRow(format!("invalid seed date {y}-{m}-{d}")))
}

/// Seeds the demo data set inside one transaction
///
/// The duplicate VIN check reads before it inserts, so two processes seeding
/// the same empty database at once could both insert. Seeding only runs at
/// startup.
pub async fn seed_demo_data(pool: &PgPool) -> Result<SeedReport, DatabaseError> {
    let mut tx = pool.begin().await?;
    let mut report = SeedReport::default();

    if VehicleRepository::count_owners(&mut *tx).await? > 0 {
        info!("Owners already present, skipping demo data");
        return Ok(report);
    }

    let mut owner_ids = Vec::new();
    for (name, email) in [
        ("Ana Pop", "ana.pop@example.com"),
        ("Bogdan Ionescu", "bogdan.ionescu@example.com"),
    ] {
        let owner = VehicleRepository::insert_owner(&mut *tx, name, Some(email)).await?;
        owner_ids.push(owner.id);
        report.owners += 1;
    }

    let mut car_ids = Vec::new();
    for car in &DEMO_CARS {
        if VehicleRepository::find_car_by_vin(&mut *tx, car.vin).await?.is_some() {
            warn!(vin = car.vin, "A car with VIN {} already exists and will not be added!", car.vin);
            report.skipped_vins.push(car.vin.to_string());
            continue;
        }
        let row = VehicleRepository::insert_car(
            &mut *tx,
            car.vin,
            Some(car.make),
            Some(car.model),
            car.year,
            owner_ids[car.owner],
        )
        .await?;
        car_ids.push(row.id);
        report.cars += 1;
    }

    let (logan, golf) = match car_ids.as_slice() {
        [logan, golf, ..] => (*logan, *golf),
        _ => return Err(DatabaseError::InvalidRow("demo cars were not created".to_string())),
    };
    let policies = [
        NewPolicyRow {
            car_id: logan,
            provider: Some("Allianz"),
            start_date: day(2024, 1, 1)?,
            end_at: Some(at(2025, 8, 30, 16, 10)?),
        },
        NewPolicyRow {
            car_id: logan,
            provider: Some("Groupama"),
            start_date: day(2025, 1, 1)?,
            end_at: Some(at(2025, 8, 30, 17, 0)?),
        },
        NewPolicyRow {
            car_id: golf,
            provider: Some("Allianz"),
            start_date: day(2025, 3, 1)?,
            end_at: Some(at(2025, 8, 30, 17, 15)?),
        },
    ];
    for policy in &policies {
        PolicyRepository::insert(&mut *tx, policy).await?;
        report.policies += 1;
    }

    tx.commit().await?;
    info!(
        owners = report.owners,
        cars = report.cars,
        policies = report.policies,
        "Demo data seeded"
    );
    Ok(report)
}
