//! Error types for Elle API

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Descriptor error: {0}")]
    Descriptor(String),

    #[error("Route registration failed for {route}: {reason}")]
    Route { route: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
