//! Claims handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use core_kernel::CarId;
use domain_claims::NewClaim;

use crate::dto::claims::{ClaimResponse, CreateClaimRequest};
use crate::{error::ApiError, AppState};

/// Registers a claim against a car and returns it with 201 Created
pub async fn register_claim(
    State(state): State<AppState>,
    path: Result<Path<CarId>, PathRejection>,
    payload: Result<Json<CreateClaimRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path(car_id) = path?;
    let Json(request) = payload?;
    request.validate()?;
    let claim_date = request
        .claim_date
        .ok_or_else(|| ApiError::Validation("claimDate is required".to_string()))?;

    let claim = state
        .registrar
        .register(car_id, NewClaim::new(claim_date, request.description, request.amount))
        .await?;

    let location = format!("/api/cars/{}/claims", car_id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(ClaimResponse::from(claim)),
    ))
}
