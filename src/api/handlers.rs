//! JSON handlers owned by the server itself (health, catalog listing)

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::error::{ApiError, ErrorEnvelope};
use super::routes::AppState;
use crate::catalog::{CatalogState, Match};

#[derive(Debug, Deserialize, IntoParams)]
pub struct CatalogParams {
    /// Category name, or `all`
    pub category: Option<String>,
    /// Case-insensitive search over name, description and category
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ParamSummary {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointSummary {
    /// Position in the flattened catalog
    pub index: usize,
    pub name: String,
    pub desc: String,
    pub method: String,
    /// Path without any example query
    pub path: String,
    pub status: String,
    pub category: String,
    pub params: Vec<ParamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategorySummary {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogData {
    pub name: Option<String>,
    pub version: Option<String>,
    /// Number of endpoints in the descriptor
    pub total: usize,
    /// Number of endpoints after filtering
    pub matched: usize,
    pub categories: Vec<CategorySummary>,
    pub endpoints: Vec<EndpointSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogResponse {
    pub status: bool,
    pub data: CatalogData,
}

impl From<&Match<'_>> for EndpointSummary {
    fn from(m: &Match<'_>) -> Self {
        let item = &m.record.item;
        Self {
            index: m.index,
            name: item.name.clone(),
            desc: item.desc.clone(),
            method: item.method().to_string(),
            path: item.display_path().to_string(),
            status: item.status.clone(),
            category: m.record.category.clone(),
            params: item
                .params
                .iter()
                .map(|p| ParamSummary {
                    name: p.name.clone(),
                    description: p.description.clone(),
                })
                .collect(),
        }
    }
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// List documented endpoints, filtered like the catalog UI
#[utoipa::path(
    get,
    path = "/api/catalog",
    params(CatalogParams),
    responses(
        (status = 200, description = "Filtered endpoint catalog", body = CatalogResponse),
        (status = 500, description = "Descriptor unavailable", body = ErrorEnvelope)
    ),
    tag = "catalog"
)]
pub async fn catalog(
    State(state): State<AppState>,
    Query(params): Query<CatalogParams>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let catalog = state
        .source
        .load()
        .await
        .map_err(|e| ApiError::Internal(e.into()))?;

    let filter = CatalogState::from_params(params.category.as_deref(), params.q.as_deref());
    let matches = catalog.filter(&filter);
    let descriptor = catalog.descriptor();

    Ok(Json(CatalogResponse {
        status: true,
        data: CatalogData {
            name: descriptor.name.clone(),
            version: descriptor.version.clone(),
            total: catalog.len(),
            matched: matches.len(),
            categories: descriptor
                .categories
                .iter()
                .map(|c| CategorySummary {
                    name: c.name.clone(),
                    icon: c.icon.clone(),
                    color: c.color.clone(),
                    count: c.items.len(),
                })
                .collect(),
            endpoints: matches.iter().map(EndpointSummary::from).collect(),
        },
    }))
}
