use thiserror::Error;

/// Everything that can go wrong talking to the store API
///
/// Callers get exactly one of these per failed request; nothing here is
/// retried or papered over with partial data.
#[derive(Error, Debug)]
pub enum StoreApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    HttpStatus { status: u16 },

    #[error("JSON parsing failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    BadFormat(String),

    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),
}

/// Coarse classification of a [`StoreApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    HttpStatus,
    Format,
    Config,
}

impl StoreApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreApiError::Transport(_) => ErrorKind::Transport,
            StoreApiError::HttpStatus { .. } => ErrorKind::HttpStatus,
            StoreApiError::Parse(_) | StoreApiError::BadFormat(_) => ErrorKind::Format,
            StoreApiError::InvalidConfig(_) => ErrorKind::Config,
        }
    }

    /// HTTP status code, if the failure came with one
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreApiError::HttpStatus { status } => Some(*status),
            StoreApiError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreApiError>;
