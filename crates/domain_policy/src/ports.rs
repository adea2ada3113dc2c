//! Policy Domain Ports
//!
//! Two kinds of storage access are needed:
//!
//! - `PolicyPort` serves request handlers: read every policy of one car.
//! - `ExpirationSessionFactory` serves the background scanner. The scanner
//!   acquires one `ExpirationSession` per cycle, runs its query and batch
//!   update through it, commits, and drops it before sleeping. Nothing is
//!   held across the sleep interval.
//!
//! ```rust,ignore
//! let mut session = factory.acquire().await?;
//! let expired = session.expired_unlogged(&window).await?;
//! session.mark_logged(&ids).await?;
//! session.commit().await?;
//! drop(session);
//! ```

use async_trait::async_trait;

use core_kernel::{CarId, DomainPort, ExpirationWindow, PolicyId, PortError};

use crate::expiration::ExpiredPolicy;
use crate::policy::InsurancePolicy;

/// Port for reading a car's policies
#[async_trait]
pub trait PolicyPort: DomainPort {
    /// Returns every policy attached to the car, in storage order
    async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError>;
}

/// Hands out one scoped storage session per scanner cycle
#[async_trait]
pub trait ExpirationSessionFactory: DomainPort {
    async fn acquire(&self) -> Result<Box<dyn ExpirationSession>, PortError>;
}

/// A unit of work for one expiration scan
///
/// Changes made through `mark_logged` become visible only after `commit`.
/// Dropping an uncommitted session discards them.
#[async_trait]
pub trait ExpirationSession: Send {
    /// Policies whose end lies inside the window and that were not reported yet,
    /// with the car's VIN loaded
    async fn expired_unlogged(
        &mut self,
        window: &ExpirationWindow,
    ) -> Result<Vec<ExpiredPolicy>, PortError>;

    /// Flags the given policies as reported, returning how many rows changed
    async fn mark_logged(&mut self, policy_ids: &[PolicyId]) -> Result<u64, PortError>;

    /// Makes the staged changes durable
    async fn commit(&mut self) -> Result<(), PortError>;
}

/// In-memory policy store for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicI64, AtomicU32, AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::CoveragePeriod;

    #[derive(Debug, Default)]
    struct StoreState {
        policies: BTreeMap<PolicyId, InsurancePolicy>,
        vins: HashMap<CarId, String>,
    }

    /// Mock implementation of both policy ports
    #[derive(Debug, Default)]
    pub struct MockPolicyStore {
        state: Arc<RwLock<StoreState>>,
        next_id: AtomicI64,
        failing_acquires: AtomicU32,
        open_sessions: Arc<AtomicUsize>,
        marked_total: Arc<AtomicU64>,
    }

    impl MockPolicyStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Stores a policy for the car and returns its id
        pub async fn add_policy(
            &self,
            car_id: CarId,
            vin: &str,
            provider: &str,
            coverage: CoveragePeriod,
        ) -> PolicyId {
            let id = PolicyId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let policy = InsurancePolicy::new(id, car_id, Some(provider.to_string()), coverage);
            let mut state = self.state.write().await;
            state.vins.insert(car_id, vin.to_string());
            state.policies.insert(id, policy);
            id
        }

        /// Returns a stored policy
        pub async fn policy(&self, id: PolicyId) -> Option<InsurancePolicy> {
            self.state.read().await.policies.get(&id).cloned()
        }

        /// Makes the next `count` calls to `acquire` fail with a connection error
        pub fn fail_next_acquires(&self, count: u32) {
            self.failing_acquires.store(count, Ordering::SeqCst);
        }

        /// Number of sessions acquired and not yet dropped
        pub fn open_sessions(&self) -> usize {
            self.open_sessions.load(Ordering::SeqCst)
        }

        /// Total number of policies flagged by committed sessions
        pub fn marked_total(&self) -> u64 {
            self.marked_total.load(Ordering::SeqCst)
        }
    }

    impl DomainPort for MockPolicyStore {}

    #[async_trait]
    impl PolicyPort for MockPolicyStore {
        async fn policies_for_car(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, PortError> {
            Ok(self
                .state
                .read()
                .await
                .policies
                .values()
                .filter(|p| p.car_id == car_id)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl ExpirationSessionFactory for MockPolicyStore {
        async fn acquire(&self) -> Result<Box<dyn ExpirationSession>, PortError> {
            let failing = self.failing_acquires.load(Ordering::SeqCst);
            if failing > 0 {
                self.failing_acquires.store(failing - 1, Ordering::SeqCst);
                return Err(PortError::connection("mock policy store unavailable"));
            }
            self.open_sessions.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockExpirationSession {
                state: Arc::clone(&self.state),
                staged: Vec::new(),
                open_sessions: Arc::clone(&self.open_sessions),
                marked_total: Arc::clone(&self.marked_total),
            }))
        }
    }

    struct MockExpirationSession {
        state: Arc<RwLock<StoreState>>,
        staged: Vec<PolicyId>,
        open_sessions: Arc<AtomicUsize>,
        marked_total: Arc<AtomicU64>,
    }

    #[async_trait]
    impl ExpirationSession for MockExpirationSession {
        async fn expired_unlogged(
            &mut self,
            window: &ExpirationWindow,
        ) -> Result<Vec<ExpiredPolicy>, PortError> {
            let state = self.state.read().await;
            let mut expired: Vec<ExpiredPolicy> = state
                .policies
                .values()
                .filter(|p| !p.expiration_logged && p.coverage.expired_within(window))
                .filter_map(|p| {
                    let vin = state.vins.get(&p.car_id)?.clone();
                    Some(ExpiredPolicy {
                        policy_id: p.id,
                        car_id: p.car_id,
                        vin,
                        expired_at: p.end()?,
                    })
                })
                .collect();
            expired.sort_by_key(|p| (p.expired_at, p.policy_id));
            Ok(expired)
        }

        async fn mark_logged(&mut self, policy_ids: &[PolicyId]) -> Result<u64, PortError> {
            let state = self.state.read().await;
            let mut changed = 0;
            for id in policy_ids {
                let unlogged = state.policies.get(id).is_some_and(|p| !p.expiration_logged);
                if unlogged && !self.staged.contains(id) {
                    self.staged.push(*id);
                    changed += 1;
                }
            }
            Ok(changed)
        }

        async fn commit(&mut self) -> Result<(), PortError> {
            let mut state = self.state.write().await;
            for id in self.staged.drain(..) {
                let policy = state
                    .policies
                    .get_mut(&id)
                    .ok_or_else(|| PortError::not_found(PolicyId::entity(), id))?;
                policy
                    .mark_expiration_logged()
                    .map_err(|e| PortError::internal(e.to_string()))?;
                self.marked_total.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        }
    }

    impl Drop for MockExpirationSession {
        fn drop(&mut self) {
            self.open_sessions.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::mock::MockPolicyStore;
    use chrono::{Duration, NaiveDate, Utc};
    use core_kernel::CoveragePeriod;

    #[tokio::test]
    async fn test_uncommitted_marks_are_discarded() {
        let store = MockPolicyStore::new();
        let now = Utc::now();
        let id = store
            .add_policy(
                CarId::new(1),
                "VIN1",
                "Allianz",
                CoveragePeriod::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), Some(now - Duration::minutes(5))),
            )
            .await;

        let mut session = store.acquire().await.unwrap();
        assert_eq!(session.mark_logged(&[id]).await.unwrap(), 1);
        drop(session);

        assert!(!store.policy(id).await.unwrap().expiration_logged);
        assert_eq!(store.open_sessions(), 0);
    }

    #[tokio::test]
    async fn test_failing_acquire() {
        let store = MockPolicyStore::new();
        store.fail_next_acquires(1);

        assert!(store.acquire().await.is_err());
        assert!(store.acquire().await.is_ok());
    }
}
