//! Timeline merging

use domain_claims::InsuranceClaim;
use domain_policy::InsurancePolicy;

use crate::event::HistoryEvent;

/// Merges policies and claims into one sequence ordered by date
///
/// Policies are placed before claims and the sort is stable, so events sharing
/// a date keep that order: policies first, each kind in input order.
pub fn merge_history(policies: &[InsurancePolicy], claims: &[InsuranceClaim]) -> Vec<HistoryEvent> {
    let mut events: Vec<HistoryEvent> = policies
        .iter()
        .map(HistoryEvent::from)
        .chain(claims.iter().map(HistoryEvent::from))
        .collect();
    events.sort_by_key(HistoryEvent::date);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_kernel::{CarId, ClaimAmount, ClaimId, CoveragePeriod, PolicyId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn policy(id: i64, start: NaiveDate) -> InsurancePolicy {
        InsurancePolicy::new(
            PolicyId::new(id),
            CarId::new(1),
            Some("Allianz".to_string()),
            CoveragePeriod::open_ended(start),
        )
    }

    fn claim(id: i64, on: NaiveDate) -> InsuranceClaim {
        InsuranceClaim {
            id: ClaimId::new(id),
            car_id: CarId::new(1),
            claim_date: on,
            description: None,
            amount: ClaimAmount::zero(),
        }
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_history(&[], &[]).is_empty());
    }

    #[test]
    fn test_interleaves_by_date() {
        let policies = [policy(1, date(2024, 1, 1)), policy(2, date(2025, 1, 1))];
        let claims = [claim(1, date(2024, 6, 1))];

        let kinds: Vec<&str> = merge_history(&policies, &claims).iter().map(HistoryEvent::kind).collect();

        assert_eq!(kinds, vec!["Insurance Policy", "Insurance Claim", "Insurance Policy"]);
    }

    #[test]
    fn test_same_day_policy_precedes_claim() {
        let day = date(2025, 3, 1);
        let events = merge_history(&[policy(7, day)], &[claim(3, day)]);

        assert!(matches!(events[0], HistoryEvent::Policy { .. }));
        assert!(matches!(events[1], HistoryEvent::Claim { .. }));
    }
}
