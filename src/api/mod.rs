//! HTTP server layer

mod assets;
mod error;
mod handlers;
mod middleware;
mod routes;

pub use error::{ApiError, ErrorEnvelope, PageError};
pub use middleware::{shape_json_response, ResponseShaper};
pub use routes::{create_router, create_router_with, ApiDoc, AppState};
