//! Property-Based Test Generators
//!
//! Proptest strategies that respect the domain rules (non-negative amounts,
//! coverage ends not before starts), plus `fake` helpers for readable names.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use core_kernel::{ClaimAmount, CoveragePeriod};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;

/// Calendar dates between 2000-01-01 and roughly 2060
pub fn calendar_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..22_000).prop_map(|offset| NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(offset))
}

/// Coverage periods with an end on or after the start, or no end
pub fn coverage_period_strategy() -> impl Strategy<Value = CoveragePeriod> {
    (calendar_date_strategy(), prop::option::of((0i64..3_000, 0u32..86_400))).prop_map(|(start, end)| {
        let end = end.map(|(days, secs)| {
            let day = start + Duration::days(days);
            Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0).unwrap()) + Duration::seconds(secs.into())
        });
        CoveragePeriod::new(start, end)
    })
}

/// Instants spread over a few days around 2025-08-30
pub fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (-259_200i64..259_200).prop_map(|secs| {
        Utc.with_ymd_and_hms(2025, 8, 30, 12, 0, 0).unwrap() + Duration::seconds(secs)
    })
}

/// Non-negative amounts with two decimal places
pub fn claim_amount_strategy() -> impl Strategy<Value = ClaimAmount> {
    (0i64..100_000_000).prop_map(|cents| ClaimAmount::new(Decimal::new(cents, 2)).unwrap())
}

/// Strictly negative amounts
pub fn negative_amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(-cents, 2))
}

/// VIN-shaped strings
pub fn vin_strategy() -> impl Strategy<Value = String> {
    "[A-HJ-NPR-Z0-9]{17}"
}

pub fn fake_owner_name() -> String {
    Name().fake()
}

pub fn fake_email() -> String {
    SafeEmail().fake()
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn generated_periods_are_well_formed(period in coverage_period_strategy()) {
            if let Some(end) = period.end_date() {
                prop_assert!(end >= period.start);
            }
        }

        #[test]
        fn generated_vins_have_seventeen_chars(vin in vin_strategy()) {
            prop_assert_eq!(vin.len(), 17);
        }
    }

    #[test]
    fn test_fake_contact_details() {
        assert!(!fake_owner_name().is_empty());
        assert!(fake_email().contains('@'));
    }
}
