//! Coverage handlers

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};

use core_kernel::{parse_calendar_date, CarId};

use crate::dto::coverage::{InsuranceValidityResponse, ValidityQuery};
use crate::{error::ApiError, AppState};

/// Reports whether the car is insured on the queried date
///
/// The date is validated before the car is looked up, so a bad date on an
/// unknown car is a 400, not a 404.
pub async fn insurance_valid(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    Query(query): Query<ValidityQuery>,
) -> Result<Json<InsuranceValidityResponse>, ApiError> {
    let Path(car_id) = path?;
    let date = parse_calendar_date(query.date.as_deref().unwrap_or_default())?;
    let valid = state.coverage.is_valid(car_id, date).await?;

    Ok(Json(InsuranceValidityResponse { car_id, date, valid }))
}
