use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{ApiKey, Config};
use crate::error::VehicleError;
use crate::types::dvla::{EnquiryRequest, upstream_error_message};
use crate::types::Vrm;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for the DVLA Vehicle Enquiry API.
///
/// One attempt per lookup: no retry, no backoff and no timeout beyond the
/// transport defaults.
#[derive(Clone)]
pub struct DvlaApi {
    client: Client,
    endpoint: Url,
    api_key: ApiKey,
}

impl DvlaApi {
    pub fn new(cfg: &Config) -> Result<Self, VehicleError> {
        let mut builder =
            Client::builder().user_agent(concat!("vehicle-check/", env!("CARGO_PKG_VERSION")));
        // Outbound proxying is configured explicitly, never from HTTP_PROXY.
        builder = match cfg.proxy.as_ref() {
            Some(proxy_url) => builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?),
            None => builder.no_proxy(),
        };

        Ok(Self {
            client: builder.build()?,
            endpoint: cfg.upstream_url().clone(),
            api_key: cfg.api_key.clone(),
        })
    }

    /// Look up one vehicle. `Ok` carries the upstream 2xx status and body
    /// unchanged; any other status becomes `VehicleError::UpstreamRejected`.
    pub async fn lookup(&self, vrm: &Vrm) -> Result<(StatusCode, Value), VehicleError> {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, self.api_key.expose())
            .json(&EnquiryRequest {
                registration_number: vrm,
            })
            .send()
            .await?;

        let status = resp.status();
        let bytes = resp.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes)?;
        debug!(%status, %payload, "DVLA response payload");

        if status.is_success() {
            info!(%vrm, %status, "DVLA lookup succeeded");
            return Ok((status, payload));
        }

        let message = upstream_error_message(&payload);
        warn!(%vrm, %status, message = %message, "DVLA rejected lookup");
        Err(VehicleError::UpstreamRejected {
            status,
            message,
            payload,
        })
    }
}
