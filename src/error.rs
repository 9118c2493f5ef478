//! Error handling and custom error types
//!
//! Provides unified error handling across the relay using thiserror.

use crate::models::Provider;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Malformed or missing request fields.
    #[error("{0}")]
    Validation(String),

    /// A credential the selected provider needs was not supplied.
    #[error("{0}")]
    MissingCredential(String),

    /// No bearer token where one is required.
    #[error("{0}")]
    Unauthorized(String),

    #[error("{provider} API error: {status} {message}")]
    Provider {
        provider: Provider,
        status: u16,
        message: String,
    },

    #[error("No content generated from {0} API")]
    NoContent(Provider),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
