use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::api::DvlaApi;
use crate::config::Config;
use crate::error::VehicleError;
use crate::handlers::vehicle::{
    health_handler, vehicle_lookup_handler, vehicle_preflight_handler,
};

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct VehicleState {
    pub dvla: Arc<DvlaApi>,
    pub body_limit: usize,
}

impl VehicleState {
    pub fn new(cfg: &Config) -> Result<Self, VehicleError> {
        Ok(Self {
            dvla: Arc::new(DvlaApi::new(cfg)?),
            body_limit: cfg.body_limit,
        })
    }
}

pub fn vehicle_router(state: VehicleState) -> Router {
    let body_limit = state.body_limit;
    Router::new()
        .route(
            "/api/vehicle",
            post(vehicle_lookup_handler).options(vehicle_preflight_handler),
        )
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
