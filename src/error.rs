//! Error types for mailtext.

use thiserror::Error;

/// Errors surfaced by configuration and the command-line front end.
///
/// Rendering itself never fails once a [`RendererConfig`](crate::RendererConfig)
/// has been built.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid renderer configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "cli")]
    #[error("config file error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
