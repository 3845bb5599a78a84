use storefront_api::StoreApiError;
use thiserror::Error;

/// Everything that can go wrong above the raw API client
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] StoreApiError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
