use axum::{
    Json,
    extract::{FromRequest, Request},
};
use tracing::{info, warn};

use crate::error::VehicleError;
use crate::types::{LookupRequest, Vrm};

/// Parses the lookup body and yields the normalized registration mark.
///
/// Rejects before any upstream call when the body is unreadable or
/// `registrationNumber` is absent, `null` or empty.
pub struct LookupPreprocess(pub Vrm);

impl<S> FromRequest<S> for LookupPreprocess
where
    S: Send + Sync,
{
    type Rejection = VehicleError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<LookupRequest>::from_request(req, state)
            .await
            .inspect_err(|rejection| warn!(error = %rejection, "unreadable lookup body"))?;

        let raw = match body.registration_number {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                warn!("lookup body without registrationNumber");
                return Err(VehicleError::MissingRegistration);
            }
        };

        let vrm = Vrm::normalize(&raw);
        info!(registration = %vrm, "vehicle lookup requested");
        Ok(LookupPreprocess(vrm))
    }
}
