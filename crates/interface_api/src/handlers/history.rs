//! History handlers

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use core_kernel::CarId;

use crate::dto::history::CarHistoryResponse;
use crate::{error::ApiError, AppState};

/// Returns the car's policies and claims in date order
pub async fn car_history(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
) -> Result<Json<CarHistoryResponse>, ApiError> {
    let Path(car_id) = path?;
    let history = state.history.history(car_id).await?;
    Ok(Json(CarHistoryResponse::from(history)))
}
