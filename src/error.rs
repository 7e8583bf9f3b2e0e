use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::types::VehicleEnvelope;

#[derive(Debug, ThisError)]
pub enum VehicleError {
    #[error("Registration number is required")]
    MissingRegistration,

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Upstream rejected lookup with status {status}: {message}")]
    UpstreamRejected {
        status: StatusCode,
        message: String,
        payload: Value,
    },

    #[error("HTTP request error")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error")]
    Json(#[from] serde_json::Error),
}

impl VehicleError {
    pub fn status(&self) -> StatusCode {
        match self {
            VehicleError::MissingRegistration => StatusCode::BAD_REQUEST,
            VehicleError::InvalidBody(rejection) => rejection.status(),
            VehicleError::UpstreamRejected { status, .. } => *status,
            VehicleError::Reqwest(_) | VehicleError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn into_envelope(self) -> VehicleEnvelope {
        let status = self.status();
        match self {
            VehicleError::UpstreamRejected {
                message, payload, ..
            } => VehicleEnvelope::failure(status, message, Some(payload)),
            VehicleError::MissingRegistration => {
                VehicleEnvelope::failure(status, self.to_string(), None)
            }
            VehicleError::InvalidBody(rejection) => {
                VehicleEnvelope::failure(status, rejection.body_text(), None)
            }
            VehicleError::Reqwest(_) | VehicleError::Json(_) => VehicleEnvelope::failure(
                status,
                format!("Internal server error: {}", error_chain(&self)),
                None,
            ),
        }
    }
}

/// Render an error with its sources, e.g. `... : connection refused`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

impl IntoResponse for VehicleError {
    fn into_response(self) -> Response {
        self.into_envelope().into_response()
    }
}
