//! Elle API - Minimal API documentation portal with a searchable endpoint catalog

pub mod config;
pub mod error;
pub mod types;

pub mod catalog;
pub mod routes;
pub mod ui;
pub mod api;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
