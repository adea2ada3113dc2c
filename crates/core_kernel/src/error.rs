//! Core error types used across the system

use chrono::NaiveDate;
use thiserror::Error;
use crate::money::AmountError;
use crate::temporal::TemporalError;

/// Core error type for the kernel
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Amount error: {0}")]
    Amount(#[from] AmountError),

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date
///
/// Empty input and out-of-range components such as `2025-99-99` are rejected.
pub fn parse_calendar_date(input: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("Date is required. Use YYYY-MM-DD."));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| CoreError::validation(format!("Invalid date '{}'. Use YYYY-MM-DD.", trimmed)))
}
