//! Coverage DTOs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::CarId;

/// Query string of the validity check
///
/// The date stays a raw string so a missing or malformed value can be
/// reported with the same message.
#[derive(Debug, Deserialize)]
pub struct ValidityQuery {
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceValidityResponse {
    pub car_id: CarId,
    /// Serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
    pub valid: bool,
}
