//! Shared configuration for the motoship shipping estimator.
//!
//! Everything is environment-driven with sensible defaults: the engine talks
//! to public Nominatim/OSRM instances out of the box, and tests point the
//! provider base URLs at a mock server instead.

mod app_config;
mod config;

pub use app_config::{AppConfig, Environment, ShopOrigin};
pub use config::{load_app_config, load_app_config_from_env};

use thiserror::Error;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
