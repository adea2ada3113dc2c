//! Periodic expiration scanning
//!
//! Once per check interval the scanner looks back over a trailing window,
//! reports every policy that ended inside it and was not reported before,
//! and flags those policies so no later cycle reports them again. The
//! interval is shorter than the window so consecutive cycles overlap.
//!
//! A failed cycle is logged and abandoned; the next attempt happens after the
//! normal interval. A policy that leaves the window during an outage is never
//! reported.

use std::fmt;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, error, info};

use core_kernel::{CarId, ExpirationWindow, PolicyId};

use crate::error::ExpirationError;
use crate::ports::ExpirationSessionFactory;

/// A policy found by a scan, with the VIN of its car
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiredPolicy {
    pub policy_id: PolicyId,
    pub car_id: CarId,
    pub vin: String,
    pub expired_at: DateTime<Utc>,
}

/// Timing of the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Pause between the end of one cycle and the start of the next
    pub check_interval: StdDuration,
    /// Length of the trailing window examined by each cycle
    pub window: Duration,
}

impl ScannerConfig {
    pub fn new(check_interval: StdDuration, window: Duration) -> Self {
        Self { check_interval, window }
    }

    /// Returns true if consecutive windows overlap
    pub fn windows_overlap(&self) -> bool {
        Duration::from_std(self.check_interval).is_ok_and(|interval| interval < self.window)
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            check_interval: StdDuration::from_secs(55 * 60),
            window: Duration::hours(1),
        }
    }
}

/// Where the scanner is in its loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    Scanning,
    Logging,
    Marking,
    Cancelled,
}

impl fmt::Display for ScannerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScannerState::Idle => "idle",
            ScannerState::Scanning => "scanning",
            ScannerState::Logging => "logging",
            ScannerState::Marking => "marking",
            ScannerState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// Outcome of one successful cycle
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub window: ExpirationWindow,
    pub expired: Vec<ExpiredPolicy>,
    pub marked: u64,
}

/// Background job reporting newly expired policies exactly once
pub struct ExpirationScanner {
    sessions: Arc<dyn ExpirationSessionFactory>,
    config: ScannerConfig,
    state: ScannerState,
}

impl ExpirationScanner {
    pub fn new(sessions: Arc<dyn ExpirationSessionFactory>, config: ScannerConfig) -> Self {
        Self {
            sessions,
            config,
            state: ScannerState::Idle,
        }
    }

    pub fn state(&self) -> ScannerState {
        self.state
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    fn transition(&mut self, next: ScannerState) {
        debug!(from = %self.state, to = %next, "Expiration scanner state change");
        self.state = next;
    }

    /// Runs a single scan as of `now`
    ///
    /// The scanner is back in `Idle` when this returns, whether or not the
    /// cycle succeeded.
    pub async fn run_cycle(&mut self, now: DateTime<Utc>) -> Result<ScanReport, ExpirationError> {
        let result = self.scan(now).await;
        self.transition(ScannerState::Idle);
        result
    }

    async fn scan(&mut self, now: DateTime<Utc>) -> Result<ScanReport, ExpirationError> {
        let window = ExpirationWindow::trailing(now, self.config.window)?;

        self.transition(ScannerState::Scanning);
        let mut session = self.sessions.acquire().await?;
        let expired = session.expired_unlogged(&window).await?;

        self.transition(ScannerState::Logging);
        for policy in &expired {
            info!(
                policy_id = %policy.policy_id,
                vin = %policy.vin,
                expired_at = %policy.expired_at,
                "Insurance policy for car {} expired at {}",
                policy.vin,
                policy.expired_at
            );
        }

        self.transition(ScannerState::Marking);
        let ids: Vec<PolicyId> = expired.iter().map(|p| p.policy_id).collect();
        let marked = if ids.is_empty() {
            0
        } else {
            session.mark_logged(&ids).await?
        };
        session.commit().await?;
        drop(session);

        Ok(ScanReport {
            window,
            expired,
            marked,
        })
    }

    /// Runs cycles until the shutdown flag becomes true or its sender is dropped
    pub async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        info!(
            interval_secs = self.config.check_interval.as_secs(),
            window_secs = self.config.window.num_seconds(),
            "Expiration scanner started"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            match self.run_cycle(Utc::now()).await {
                Ok(report) => debug!(
                    expired = report.expired.len(),
                    marked = report.marked,
                    "Expiration scan complete"
                ),
                Err(e) => error!(
                    error = %e,
                    transient = e.is_transient(),
                    "Error while logging expired policies"
                ),
            }

            if wait_for_next_cycle(self.config.check_interval, &mut shutdown).await {
                break;
            }
        }

        self.transition(ScannerState::Cancelled);
        info!("Expiration scanner stopped");
    }
}

/// Sleeps for `interval`, returning true early if shutdown is requested
async fn wait_for_next_cycle(interval: StdDuration, shutdown: &mut watch::Receiver<bool>) -> bool {
    let sleep = tokio::time::sleep(interval);
    tokio::pin!(sleep);

    loop {
        tokio::select! {
            _ = &mut sleep => return false,
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    return true;
                }
            }
        }
    }
}
