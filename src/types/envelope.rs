use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

/// Normalized body returned by `/api/vehicle` for every outcome.
///
/// The HTTP status of the response always mirrors `status_code`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status_code: u16,
}

impl VehicleEnvelope {
    pub fn success(status: StatusCode, data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            status_code: status.as_u16(),
        }
    }

    pub fn failure(status: StatusCode, error: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
            status_code: status.as_u16(),
        }
    }
}

impl IntoResponse for VehicleEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
