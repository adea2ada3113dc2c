//! Expiration scanner tests
//!
//! Cycles are driven with an explicit `now` so window arithmetic is exact.
//! The loop tests run on a paused tokio clock.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use core_kernel::{CarId, CoveragePeriod, PolicyId};
use domain_policy::ports::mock::MockPolicyStore;
use domain_policy::{ExpirationError, ExpirationScanner, ScannerConfig, ScannerState};
use tokio::sync::watch;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 30, 17, 30, 0).unwrap()
}

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

async fn add_ending_at(store: &MockPolicyStore, car: i64, vin: &str, end: DateTime<Utc>) -> PolicyId {
    store
        .add_policy(CarId::new(car), vin, "Allianz", CoveragePeriod::new(start(), Some(end)))
        .await
}

fn scanner(store: &Arc<MockPolicyStore>) -> ExpirationScanner {
    ExpirationScanner::new(store.clone(), ScannerConfig::default())
}

mod single_cycle {
    use super::*;

    #[tokio::test]
    async fn test_reports_policies_expired_in_window() {
        let store = Arc::new(MockPolicyStore::new());
        let recent = add_ending_at(&store, 1, "VIN12345", now() - Duration::minutes(20)).await;
        let old = add_ending_at(&store, 2, "VIN67890", now() - Duration::hours(3)).await;
        let future = add_ending_at(&store, 3, "VIN55555", now() + Duration::minutes(10)).await;
        store.add_policy(CarId::new(4), "VINOPEN", "Groupama", CoveragePeriod::open_ended(start())).await;

        let report = scanner(&store).run_cycle(now()).await.unwrap();

        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].policy_id, recent);
        assert_eq!(report.expired[0].vin, "VIN12345");
        assert_eq!(report.marked, 1);
        assert!(store.policy(recent).await.unwrap().expiration_logged);
        assert!(!store.policy(old).await.unwrap().expiration_logged);
        assert!(!store.policy(future).await.unwrap().expiration_logged);
    }

    #[tokio::test]
    async fn test_window_is_one_hour_ending_now() {
        let store = Arc::new(MockPolicyStore::new());
        let report = scanner(&store).run_cycle(now()).await.unwrap();

        assert_eq!(report.window.end, now());
        assert_eq!(report.window.start, now() - Duration::hours(1));
        assert!(report.expired.is_empty());
        assert_eq!(report.marked, 0);
    }

    #[tokio::test]
    async fn test_window_edges_are_inclusive() {
        let store = Arc::new(MockPolicyStore::new());
        let at_now = add_ending_at(&store, 1, "VINA", now()).await;
        let at_start = add_ending_at(&store, 2, "VINB", now() - Duration::hours(1)).await;

        let report = scanner(&store).run_cycle(now()).await.unwrap();

        let ids: Vec<PolicyId> = report.expired.iter().map(|p| p.policy_id).collect();
        assert!(ids.contains(&at_now));
        assert!(ids.contains(&at_start));
    }

    #[tokio::test]
    async fn test_session_released_after_cycle() {
        let store = Arc::new(MockPolicyStore::new());
        add_ending_at(&store, 1, "VIN12345", now() - Duration::minutes(5)).await;

        let mut scanner = scanner(&store);
        scanner.run_cycle(now()).await.unwrap();

        assert_eq!(store.open_sessions(), 0);
        assert_eq!(scanner.state(), ScannerState::Idle);
    }
}

mod idempotence {
    use super::*;

    #[tokio::test]
    async fn test_repeated_cycles_report_each_policy_once() {
        let store = Arc::new(MockPolicyStore::new());
        add_ending_at(&store, 1, "VIN12345", now() - Duration::minutes(30)).await;
        add_ending_at(&store, 2, "VIN67890", now() - Duration::minutes(15)).await;

        let mut scanner = scanner(&store);
        let first = scanner.run_cycle(now()).await.unwrap();
        let second = scanner.run_cycle(now() + Duration::minutes(55)).await.unwrap();
        let third = scanner.run_cycle(now() + Duration::minutes(56)).await.unwrap();

        assert_eq!(first.expired.len(), 2);
        assert!(second.expired.is_empty());
        assert!(third.expired.is_empty());
        assert_eq!(store.marked_total(), 2);
    }

    #[tokio::test]
    async fn test_overlapping_cycles_pick_up_new_expirations() {
        let store = Arc::new(MockPolicyStore::new());
        let first_id = add_ending_at(&store, 1, "VIN12345", now() - Duration::minutes(10)).await;

        let mut scanner = scanner(&store);
        scanner.run_cycle(now()).await.unwrap();

        let second_id = add_ending_at(&store, 2, "VIN67890", now() + Duration::minutes(30)).await;
        let report = scanner.run_cycle(now() + Duration::minutes(55)).await.unwrap();

        assert_eq!(report.expired.len(), 1);
        assert_eq!(report.expired[0].policy_id, second_id);
        assert!(store.policy(first_id).await.unwrap().expiration_logged);
        assert_eq!(store.marked_total(), 2);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn test_failed_cycle_is_abandoned_and_retried_next_time() {
        let store = Arc::new(MockPolicyStore::new());
        // still inside the next cycle's window [now - 5m, now + 55m]
        let id = add_ending_at(&store, 1, "VIN12345", now() - Duration::minutes(2)).await;
        store.fail_next_acquires(1);

        let mut scanner = scanner(&store);
        let failed = scanner.run_cycle(now()).await;
        assert!(matches!(failed, Err(ExpirationError::Storage(ref e)) if e.is_transient()));
        assert_eq!(scanner.state(), ScannerState::Idle);
        assert!(!store.policy(id).await.unwrap().expiration_logged);

        let retried = scanner.run_cycle(now() + Duration::minutes(55)).await.unwrap();
        assert_eq!(retried.expired.len(), 1);
        assert!(store.policy(id).await.unwrap().expiration_logged);
    }

    #[tokio::test]
    async fn test_policy_missed_during_outage_is_skipped() {
        let store = Arc::new(MockPolicyStore::new());
        let id = add_ending_at(&store, 1, "VIN12345", now() - Duration::minutes(50)).await;
        store.fail_next_acquires(1);

        let mut scanner = scanner(&store);
        assert!(scanner.run_cycle(now()).await.is_err());

        let report = scanner.run_cycle(now() + Duration::minutes(55)).await.unwrap();
        assert!(report.expired.is_empty());
        assert!(!store.policy(id).await.unwrap().expiration_logged);
    }

    #[tokio::test]
    async fn test_non_positive_window_is_rejected() {
        let store = Arc::new(MockPolicyStore::new());
        let config = ScannerConfig::new(StdDuration::from_secs(60), Duration::zero());
        let mut scanner = ExpirationScanner::new(store.clone(), config);

        let result = scanner.run_cycle(now()).await;
        assert!(matches!(result, Err(ExpirationError::Window(_))));
        assert_eq!(store.open_sessions(), 0);
    }
}

mod background_loop {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_loop_stops_promptly_on_shutdown() {
        let store = Arc::new(MockPolicyStore::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(scanner(&store).run(shutdown_rx));
        tokio::time::sleep(StdDuration::from_secs(5)).await;

        shutdown_tx.send(true).unwrap();
        tokio::time::timeout(StdDuration::from_secs(1), handle)
            .await
            .expect("scanner did not stop within the sleep interval")
            .unwrap();
        assert_eq!(store.open_sessions(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_flags_expired_policy_once_across_cycles() {
        let store = Arc::new(MockPolicyStore::new());
        let id = add_ending_at(&store, 1, "VIN12345", Utc::now() - Duration::minutes(5)).await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(scanner(&store).run(shutdown_rx));
        tokio::time::sleep(StdDuration::from_secs(3 * 55 * 60)).await;

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(store.policy(id).await.unwrap().expiration_logged);
        assert_eq!(store.marked_total(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_exits_when_shutdown_sender_dropped() {
        let store = Arc::new(MockPolicyStore::new());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(scanner(&store).run(shutdown_rx));
        drop(shutdown_tx);

        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_loop_survives_failed_cycles() {
        let store = Arc::new(MockPolicyStore::new());
        store.fail_next_acquires(2);
        let id = add_ending_at(&store, 1, "VIN12345", Utc::now() - Duration::minutes(1)).await;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let config = ScannerConfig::new(StdDuration::from_secs(60), Duration::hours(1));
        let handle = tokio::spawn(ExpirationScanner::new(store.clone(), config).run(shutdown_rx));
        tokio::time::sleep(StdDuration::from_secs(150)).await;

        shutdown_tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(store.policy(id).await.unwrap().expiration_logged);
    }
}
