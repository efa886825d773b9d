pub mod app_config;
pub mod config;
pub mod fields;
pub mod mapper;
pub mod record;
pub mod row;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use mapper::map_row;
pub use record::{
    Identity, ImportRecord, MediaContentType, MediaRef, Metafield, RemoteProductRef,
    VariantFields,
};
pub use row::RawRow;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
