//! Error types for np-core

use thiserror::Error;

pub use reqwest::StatusCode;

/// Main error type for np-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Neuronpedia API error: {status} - {body}")]
    Api {
        status: StatusCode,
        body: String,
    },

    #[error("Malformed response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    InvalidArguments(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for np-core
pub type Result<T> = std::result::Result<T, Error>;
