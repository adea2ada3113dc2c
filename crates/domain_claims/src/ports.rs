//! Claims Domain Ports
//!
//! Claims are append-only: the port can list a car's claims and add a new one,
//! nothing else.

use async_trait::async_trait;

use core_kernel::{CarId, DomainPort, PortError};

use crate::claim::{ClaimDraft, InsuranceClaim};

/// Port for claim storage
#[async_trait]
pub trait ClaimPort: DomainPort {
    /// Returns every claim of the car, in storage order
    async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError>;

    /// Persists a claim and returns it with its generated id
    async fn append_claim(&self, draft: ClaimDraft) -> Result<InsuranceClaim, PortError>;
}

/// Mock implementation of ClaimPort for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
    use tokio::sync::RwLock;

    use core_kernel::ClaimId;

    /// In-memory claim store
    #[derive(Debug, Default)]
    pub struct MockClaimStore {
        claims: RwLock<Vec<InsuranceClaim>>,
        next_id: AtomicI64,
        reject_writes: AtomicBool,
    }

    impl MockClaimStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes `append_claim` fail with a connection error
        pub fn set_reject_writes(&self, reject: bool) {
            self.reject_writes.store(reject, Ordering::SeqCst);
        }

        /// Every stored claim, for assertions
        pub async fn all(&self) -> Vec<InsuranceClaim> {
            self.claims.read().await.clone()
        }
    }

    impl DomainPort for MockClaimStore {}

    #[async_trait]
    impl ClaimPort for MockClaimStore {
        async fn claims_for_car(&self, car_id: CarId) -> Result<Vec<InsuranceClaim>, PortError> {
            Ok(self
                .claims
                .read()
                .await
                .iter()
                .filter(|c| c.car_id == car_id)
                .cloned()
                .collect())
        }

        async fn append_claim(&self, draft: ClaimDraft) -> Result<InsuranceClaim, PortError> {
            if self.reject_writes.load(Ordering::SeqCst) {
                return Err(PortError::connection("mock claim store unavailable"));
            }
            let id = ClaimId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
            let claim = draft.into_claim(id);
            self.claims.write().await.push(claim.clone());
            Ok(claim)
        }
    }
}
