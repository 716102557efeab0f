pub mod app_config;
pub mod config;
pub mod records;

pub use app_config::{AppConfig, Environment, ItemFailurePolicy};
pub use config::{load_app_config, load_app_config_from_env, with_trailing_slash};
pub use records::{ItemRecord, MAX_RATING, MIN_RATING};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
