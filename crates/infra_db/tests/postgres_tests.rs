//! PostgreSQL adapter tests
//!
//! These start a database container and are ignored by default:
//! `cargo test -p infra_db -- --ignored`

use chrono::{Duration, NaiveDate, Utc};
use core_kernel::{CarId, ExpirationWindow, HealthCheckable, PortError};
use domain_claims::{ClaimDraft, ClaimPort};
use domain_policy::{ExpirationSessionFactory, PolicyPort};
use domain_vehicle::VehiclePort;
use infra_db::adapters::{PostgresClaimAdapter, PostgresPolicyAdapter, PostgresVehicleAdapter};
use infra_db::repositories::{NewPolicyRow, PolicyRepository, VehicleRepository};
use infra_db::seed_demo_data;
use rust_decimal_macros::dec;
use test_utils::TestDatabase;

async fn car(db: &TestDatabase, vin: &str) -> CarId {
    let owner = VehicleRepository::insert_owner(db.pool(), "Test Owner", None).await.unwrap();
    let car = VehicleRepository::insert_car(db.pool(), vin, Some("Dacia"), Some("Logan"), 2020, owner.id)
        .await
        .unwrap();
    CarId::new(car.id)
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_seed_skips_duplicate_vin_and_runs_once() {
    let db = TestDatabase::new().await.unwrap();

    let first = seed_demo_data(db.pool()).await.unwrap();
    assert_eq!(first.owners, 2);
    assert_eq!(first.cars, 2);
    assert_eq!(first.policies, 3);
    assert_eq!(first.skipped_vins, vec!["VIN67890".to_string()]);

    let second = seed_demo_data(db.pool()).await.unwrap();
    assert!(second.is_empty());

    let cars = PostgresVehicleAdapter::new(db.pool.clone()).list_cars().await.unwrap();
    assert_eq!(cars.len(), 2);
    assert_eq!(cars[1].model.as_deref(), Some("Golf"));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_vehicle_adapter_existence_and_health() {
    let db = TestDatabase::new().await.unwrap();
    let adapter = PostgresVehicleAdapter::new(db.pool.clone());
    let id = car(&db, "VINEXISTS").await;

    assert!(adapter.car_exists(id).await.unwrap());
    assert!(!adapter.car_exists(CarId::new(999)).await.unwrap());
    assert!(adapter.health_check().await.is_healthy());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_claims_round_trip_through_adapter() {
    let db = TestDatabase::new().await.unwrap();
    let adapter = PostgresClaimAdapter::new(db.pool.clone());
    let id = car(&db, "VINCLAIM").await;

    let stored = adapter
        .append_claim(ClaimDraft {
            car_id: id,
            claim_date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            description: Some("Mirror".to_string()),
            amount: core_kernel::ClaimAmount::new(dec!(99.90)).unwrap(),
        })
        .await
        .unwrap();

    let claims = adapter.claims_for_car(id).await.unwrap();
    assert_eq!(claims, vec![stored]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_negative_amount_violates_constraint() {
    let db = TestDatabase::new().await.unwrap();
    let id = car(&db, "VINNEG").await;

    let result = sqlx::query("INSERT INTO claims (car_id, claim_date, amount) VALUES ($1, '2025-01-01', -1)")
        .bind(id.value())
        .execute(db.pool())
        .await;
    let error = infra_db::DatabaseError::from(result.unwrap_err());

    assert!(error.is_constraint_violation());
    assert!(matches!(PortError::from(error), PortError::Validation { .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_amount_wider_than_column_is_validation() {
    let db = TestDatabase::new().await.unwrap();
    let id = car(&db, "VINWIDE").await;

    let result = sqlx::query("INSERT INTO claims (car_id, claim_date, amount) VALUES ($1, '2025-01-01', 1e17)")
        .bind(id.value())
        .execute(db.pool())
        .await;
    let error = infra_db::DatabaseError::from(result.unwrap_err());

    assert!(error.is_constraint_violation());
    assert!(matches!(PortError::from(error), PortError::Validation { .. }));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_expiration_session_marks_once_and_rolls_back_on_drop() {
    let db = TestDatabase::new().await.unwrap();
    let adapter = PostgresPolicyAdapter::new(db.pool.clone());
    let id = car(&db, "VINSCAN").await;
    let now = Utc::now();

    for (provider, end) in [
        ("Recent", Some(now - Duration::minutes(10))),
        ("Old", Some(now - Duration::hours(5))),
        ("Open", None),
    ] {
        PolicyRepository::insert(
            db.pool(),
            &NewPolicyRow {
                car_id: id.value(),
                provider: Some(provider),
                start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                end_at: end,
            },
        )
        .await
        .unwrap();
    }
    let window = ExpirationWindow::trailing(now, Duration::hours(1)).unwrap();

    // Uncommitted marks are rolled back when the session is dropped
    {
        let mut session = adapter.acquire().await.unwrap();
        let expired = session.expired_unlogged(&window).await.unwrap();
        assert_eq!(expired.len(), 1);
        assert_eq!(expired[0].vin, "VINSCAN");
        session.mark_logged(&[expired[0].policy_id]).await.unwrap();
    }

    let mut session = adapter.acquire().await.unwrap();
    let expired = session.expired_unlogged(&window).await.unwrap();
    assert_eq!(expired.len(), 1);
    assert_eq!(session.mark_logged(&[expired[0].policy_id]).await.unwrap(), 1);
    session.commit().await.unwrap();
    drop(session);

    let mut session = adapter.acquire().await.unwrap();
    assert!(session.expired_unlogged(&window).await.unwrap().is_empty());
    drop(session);

    let policies = adapter.policies_for_car(id).await.unwrap();
    assert_eq!(policies.iter().filter(|p| p.expiration_logged).count(), 1);
    assert!(policies.iter().any(|p| p.coverage.is_open_ended()));
}
