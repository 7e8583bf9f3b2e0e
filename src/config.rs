//! Process configuration, loaded once at startup and injected into the router.
//!
//! Sources, lowest to highest precedence:
//! - built-in defaults (see the `default_*` functions)
//! - `VEHICLE_CHECK_*` variables, e.g. `VEHICLE_CHECK_USE_TEST_ENDPOINT=true`
//! - the credential, taken verbatim from `DVLA_API_KEY` then `VEHICLE_CHECK_API_KEY`

use std::fmt;
use std::net::SocketAddr;

use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;
use url::Url;

pub const ENV_PREFIX: &str = "VEHICLE_CHECK_";
pub const LEGACY_API_KEY_VAR: &str = "DVLA_API_KEY";
pub const API_KEY_VAR: &str = "VEHICLE_CHECK_API_KEY";

pub const DVLA_PRODUCTION_URL: &str =
    "https://driver-vehicle-licensing.api.gov.uk/vehicle-enquiry/v1/vehicles";
pub const DVLA_TEST_URL: &str =
    "https://uat.driver-vehicle-licensing.api.gov.uk/vehicle-enquiry/v1/vehicles";

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("missing upstream API key; set DVLA_API_KEY or VEHICLE_CHECK_API_KEY")]
    MissingApiKey,
}

/// Upstream credential. Never rendered in logs or debug output.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Sent upstream as `x-api-key`.
    pub api_key: ApiKey,

    /// Route lookups to the DVLA UAT environment instead of production.
    #[serde(default)]
    pub use_test_endpoint: bool,

    #[serde(default = "default_production_url")]
    pub production_url: Url,

    #[serde(default = "default_test_url")]
    pub test_url: Url,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Optional outbound proxy for the upstream client.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// Max inbound request body, in bytes.
    #[serde(default = "default_body_limit")]
    pub body_limit: usize,
}

fn default_production_url() -> Url {
    Url::parse(DVLA_PRODUCTION_URL).expect("valid built-in production URL")
}

fn default_test_url() -> Url {
    Url::parse(DVLA_TEST_URL).expect("valid built-in test URL")
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_body_limit() -> usize {
    16 * 1024
}

/// Defaults for every field except the credential, which has none.
#[derive(Serialize)]
struct Defaults {
    use_test_endpoint: bool,
    production_url: Url,
    test_url: Url,
    listen_addr: SocketAddr,
    loglevel: String,
    body_limit: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            use_test_endpoint: false,
            production_url: default_production_url(),
            test_url: default_test_url(),
            listen_addr: default_listen_addr(),
            loglevel: default_loglevel(),
            body_limit: default_body_limit(),
        }
    }
}

impl Config {
    /// Build a config with defaults and the given credential.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        let d = Defaults::default();
        Self {
            api_key: ApiKey::new(api_key),
            use_test_endpoint: d.use_test_endpoint,
            production_url: d.production_url,
            test_url: d.test_url,
            listen_addr: d.listen_addr,
            loglevel: d.loglevel,
            proxy: None,
            body_limit: d.body_limit,
        }
    }

    /// The figment the process reads its configuration from.
    ///
    /// The credential is merged as the raw variable text so that keys which
    /// look like numbers, booleans or arrays stay opaque strings.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Defaults::default()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["api_key"]));
        for var in [LEGACY_API_KEY_VAR, API_KEY_VAR] {
            if let Some(key) = Env::var(var) {
                figment = figment.merge(Serialized::default("api_key", key));
            }
        }
        figment
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        if !figment.contains("api_key") {
            return Err(ConfigError::MissingApiKey);
        }
        let cfg: Config = figment.extract()?;
        if cfg.api_key.is_blank() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(cfg)
    }

    /// Base URL selected by `use_test_endpoint`.
    pub fn upstream_url(&self) -> &Url {
        if self.use_test_endpoint {
            &self.test_url
        } else {
            &self.production_url
        }
    }
}
