//! Car handlers

use axum::{extract::State, Json};

use crate::dto::cars::CarResponse;
use crate::{error::ApiError, AppState};

/// Lists all cars with their owners
pub async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarResponse>>, ApiError> {
    let cars = state.catalogue.list_cars().await?;
    Ok(Json(cars.into_iter().map(CarResponse::from).collect()))
}
