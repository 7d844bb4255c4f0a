//! Route registry
//!
//! Every route module exposes a [`RouteModule`] naming its category and a
//! registration function. [`REGISTRY`] lists them in load order; adding a
//! route means adding its module here.

pub mod ai;

use axum::Router;
use std::collections::HashSet;

use crate::api::AppState;
use crate::error::{Error, Result};

/// Registration hook: receives the application router and returns it with routes attached
pub type Register = fn(Router<AppState>) -> Result<Router<AppState>>;

#[derive(Clone, Copy)]
pub struct RouteModule {
    /// Grouping directory, e.g. `ai`
    pub category: &'static str,
    /// Module name within the category, e.g. `chat`
    pub name: &'static str,
    pub register: Register,
}

impl RouteModule {
    pub fn id(&self) -> String {
        format!("{}/{}", self.category, self.name)
    }
}

impl std::fmt::Debug for RouteModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteModule")
            .field("category", &self.category)
            .field("name", &self.name)
            .finish()
    }
}

/// All route modules, in load order
pub static REGISTRY: &[RouteModule] = &[ai::chat::MODULE];

/// Attach every module to `router`. Any failure aborts loading.
pub fn load_routes(
    mut router: Router<AppState>,
    modules: &[RouteModule],
) -> Result<(Router<AppState>, usize)> {
    let mut seen = HashSet::new();

    for module in modules {
        let id = module.id();
        if !seen.insert(id.clone()) {
            return Err(Error::Route {
                route: id,
                reason: "registered twice".into(),
            });
        }

        router = (module.register)(router).map_err(|e| match e {
            Error::Route { .. } => e,
            other => Error::Route {
                route: id.clone(),
                reason: other.to_string(),
            },
        })?;

        tracing::info!(route = %id, "Loaded route");
    }

    tracing::info!(total = modules.len(), "Route loading complete");
    Ok((router, modules.len()))
}
