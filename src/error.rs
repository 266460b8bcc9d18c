//! Error type for the fallible parts of the library (config, providers).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoastwatchError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("failed to read {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config file {path:?}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("provider request failed: {0}")]
    Provider(String),
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, CoastwatchError>;
