use axum::{
    extract::State,
    http::{
        StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        },
    },
    response::IntoResponse,
};
use tracing::error;

use crate::error::error_chain;
use crate::middleware::LookupPreprocess;
use crate::types::VehicleEnvelope;
use crate::{VehicleError, router::VehicleState};

/// POST /api/vehicle -> one DVLA enquiry, always answered with an envelope.
pub async fn vehicle_lookup_handler(
    State(state): State<VehicleState>,
    LookupPreprocess(vrm): LookupPreprocess,
) -> Result<VehicleEnvelope, VehicleError> {
    match state.dvla.lookup(&vrm).await {
        Ok((status, data)) => Ok(VehicleEnvelope::success(status, data)),
        Err(err @ VehicleError::UpstreamRejected { .. }) => Err(err),
        Err(err) => {
            error!(registration = %vrm, error = %error_chain(&err), "DVLA lookup failed");
            Err(err)
        }
    }
}

/// OPTIONS /api/vehicle -> CORS preflight, empty body.
pub async fn vehicle_preflight_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}

/// GET /health -> liveness probe.
pub async fn health_handler() -> &'static str {
    "OK"
}
