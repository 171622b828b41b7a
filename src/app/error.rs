use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum GemsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed API response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Feed parsing error: {0}")]
    FeedParse(String),

    #[error("Feed writing error: {0}")]
    FeedWrite(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl GemsError {
    /// Failures coming from the upstream API rather than local I/O.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, GemsError::Http(_) | GemsError::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, GemsError>;
