pub mod api;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod types;

pub use config::{Config, ConfigError};
pub use error::VehicleError;
pub use types::{VehicleEnvelope, Vrm};
