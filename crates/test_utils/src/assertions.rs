//! Custom Test Assertions

use domain_history::HistoryEvent;
use domain_policy::ScanReport;

/// Asserts that events are in non-decreasing date order
pub fn assert_chronological(events: &[HistoryEvent]) {
    for (index, pair) in events.windows(2).enumerate() {
        assert!(
            pair[0].date() <= pair[1].date(),
            "Event {} ({}) is dated after event {} ({})",
            index,
            pair[0].date(),
            index + 1,
            pair[1].date()
        );
    }
}

/// Asserts that a scan reported exactly the given VINs, in order
pub fn assert_reported_vins(report: &ScanReport, expected: &[&str]) {
    let vins: Vec<&str> = report.expired.iter().map(|p| p.vin.as_str()).collect();
    assert_eq!(vins, expected, "Unexpected VINs in scan of {:?}", report.window);
}
