//! Coverage periods and expiration windows
//!
//! A policy covers a range of calendar dates. The start is always a date; the
//! end is an optional instant, and an absent end means the policy never
//! lapses. Coverage checks are made at date granularity: the end instant is
//! reduced to its UTC calendar date before comparison, so a policy ending at
//! `2025-08-30T16:10:00Z` still covers the whole of 2025-08-30.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors related to temporal values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Window length must be positive, got {0} seconds")]
    NonPositiveWindow(i64),

    #[error("Window of {0} seconds reaches before the earliest representable instant")]
    WindowOutOfRange(i64),
}

/// The dates covered by an insurance policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoveragePeriod {
    /// First covered date (inclusive)
    pub start: NaiveDate,
    /// Instant coverage ends (inclusive at date granularity), None means open-ended
    pub end: Option<DateTime<Utc>>,
}

impl CoveragePeriod {
    /// Creates a period from stored values without checking their order
    pub fn new(start: NaiveDate, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Creates a period, rejecting an end that falls on a date before the start
    pub fn try_new(start: NaiveDate, end: Option<DateTime<Utc>>) -> Result<Self, TemporalError> {
        if let Some(end) = end {
            if end.date_naive() < start {
                return Err(TemporalError::InvalidPeriod {
                    start: start.to_string(),
                    end: end.to_rfc3339(),
                });
            }
        }
        Ok(Self { start, end })
    }

    /// Creates an open-ended period starting on the given date
    pub fn open_ended(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Returns true if the period has no recorded end
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Returns the last covered calendar date (UTC), if any
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end.map(|end| end.date_naive())
    }

    /// Returns true if the given date falls inside the period, both ends inclusive
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && self.end_date().map_or(true, |end| end >= date)
    }

    /// Returns true if the period ended inside the given window
    ///
    /// Open-ended periods never expire.
    pub fn expired_within(&self, window: &ExpirationWindow) -> bool {
        self.end.is_some_and(|end| window.contains(end))
    }
}

/// A trailing window of time ending at `end`, both bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl ExpirationWindow {
    /// Creates the window `[now - length, now]`
    pub fn trailing(now: DateTime<Utc>, length: Duration) -> Result<Self, TemporalError> {
        if length <= Duration::zero() {
            return Err(TemporalError::NonPositiveWindow(length.num_seconds()));
        }
        let start = now
            .checked_sub_signed(length)
            .ok_or(TemporalError::WindowOutOfRange(length.num_seconds()))?;
        Ok(Self { start, end: now })
    }

    /// Returns true if the instant lies inside the window
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Returns the window length
    pub fn length(&self) -> Duration {
        self.end - self.start
    }
}
