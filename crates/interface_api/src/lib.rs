//! HTTP API Layer
//!
//! REST surface of the car insurance records service.
//!
//! # Architecture
//!
//! - **Handlers**: one module per resource, delegating to the domain services
//! - **Middleware**: request ids, tracing, audit logging
//! - **DTOs**: camelCase request and response bodies
//! - **Error Handling**: `ApiError` turns domain errors into status codes
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(vehicles, policies, claims));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::{ClaimPort, ClaimRegistrar};
use domain_history::HistoryService;
use domain_policy::{CoverageChecker, PolicyPort};
use domain_vehicle::{CarCatalogue, VehiclePort};

use crate::handlers::{cars, claims, coverage, health, history};
use crate::middleware::audit_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub vehicles: Arc<dyn VehiclePort>,
    pub catalogue: CarCatalogue,
    pub coverage: CoverageChecker,
    pub registrar: ClaimRegistrar,
    pub history: HistoryService,
}

impl AppState {
    /// Wires the domain services to the given ports
    pub fn new(
        vehicles: Arc<dyn VehiclePort>,
        policies: Arc<dyn PolicyPort>,
        claims: Arc<dyn ClaimPort>,
    ) -> Self {
        Self {
            catalogue: CarCatalogue::new(vehicles.clone()),
            coverage: CoverageChecker::new(vehicles.clone(), policies.clone()),
            registrar: ClaimRegistrar::new(vehicles.clone(), claims.clone()),
            history: HistoryService::new(vehicles.clone(), policies, claims),
            vehicles,
        }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let car_routes = Router::new()
        .route("/", get(cars::list_cars))
        .route("/:id/insurance-valid", get(coverage::insurance_valid))
        .route("/:id/claims", post(claims::register_claim))
        .route("/:id/history", get(history::car_history));

    let api_routes = Router::new()
        .nest("/cars", car_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
