use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::vrm::Vrm;

pub const GENERIC_UPSTREAM_ERROR: &str = "Failed to fetch vehicle details";

/// Inbound lookup body from the front end.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupRequest {
    #[serde(default)]
    pub registration_number: Option<String>,
}

/// Outbound body for the Vehicle Enquiry API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryRequest<'a> {
    pub registration_number: &'a Vrm,
}

/// The single slice of the DVLA error payload that is read locally:
/// `{"errors":[{"title": ..., "detail": ...}, ...]}`.
#[derive(Debug, Deserialize)]
struct UpstreamErrors {
    #[serde(default)]
    errors: Vec<UpstreamErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct UpstreamErrorEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

/// Best-effort human readable message from an upstream error payload.
pub fn upstream_error_message(payload: &Value) -> String {
    let first = UpstreamErrors::deserialize(payload)
        .ok()
        .and_then(|e| e.errors.into_iter().next());

    first
        .and_then(|entry| {
            [entry.detail, entry.title]
                .into_iter()
                .flatten()
                .find(|s| !s.is_empty())
        })
        .unwrap_or_else(|| GENERIC_UPSTREAM_ERROR.to_string())
}
