//! Router assembly and shared application state

use axum::{
    handler::HandlerWithoutStateExt,
    middleware,
    response::Response,
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::assets;
use super::error::{not_found, server_error_response, ErrorEnvelope};
use super::handlers::{
    self, CatalogData, CatalogResponse, CategorySummary, EndpointSummary, HealthResponse,
    ParamSummary,
};
use super::middleware::{shape_json_response, ResponseShaper};
use crate::config::Config;
use crate::error::Result;
use crate::routes::ai::chat::{ChatReply, ChatResponse};
use crate::routes::{load_routes, RouteModule, REGISTRY};
use crate::types::Descriptor;
use crate::ui::{self, DescriptorSource, FileSource, HttpInvoker, HttpSource, Invoker};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Elle API",
        version = "0.1.0",
        description = "Endpoints documented by the Elle API catalog"
    ),
    tags(
        (name = "ai", description = "Assistant routes"),
        (name = "catalog", description = "Endpoint catalog"),
        (name = "health", description = "Health checks")
    ),
    paths(
        handlers::health,
        handlers::catalog,
        crate::routes::ai::chat::chat,
    ),
    components(schemas(
        HealthResponse,
        CatalogResponse,
        CatalogData,
        CategorySummary,
        EndpointSummary,
        ParamSummary,
        ChatResponse,
        ChatReply,
        ErrorEnvelope,
    ))
)]
pub struct ApiDoc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Descriptor read at startup
    pub descriptor: Arc<Descriptor>,
    /// Where UI pages load the descriptor from
    pub source: Arc<dyn DescriptorSource>,
    /// Sends try-it requests
    pub invoker: Arc<dyn Invoker>,
}

impl AppState {
    /// State with the configured descriptor source and an HTTP invoker
    pub fn new(config: Config, descriptor: Descriptor) -> Result<Self> {
        let source: Arc<dyn DescriptorSource> = match config.ui.descriptor_url.as_deref() {
            Some(url) => Arc::new(HttpSource::new(reqwest::Client::new(), url)),
            None => Arc::new(FileSource::new(config.descriptor_path.clone())),
        };
        let invoker = Arc::new(HttpInvoker::new(config.request_timeout())?);

        Ok(Self {
            config: Arc::new(config),
            descriptor: Arc::new(descriptor),
            source,
            invoker,
        })
    }

    pub fn with_source(mut self, source: Arc<dyn DescriptorSource>) -> Self {
        self.source = source;
        self
    }

    pub fn with_invoker(mut self, invoker: Arc<dyn Invoker>) -> Self {
        self.invoker = invoker;
        self
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");
    server_error_response()
}

/// Create the application router with every registered route module
pub fn create_router(state: AppState) -> Result<Router> {
    create_router_with(state, REGISTRY)
}

/// Create the application router with an explicit set of route modules
pub fn create_router_with(state: AppState, modules: &[RouteModule]) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let shaper = ResponseShaper::new(state.descriptor.creator());
    let static_src = ServeDir::new(state.config.static_src_dir())
        .not_found_service(not_found.into_service());

    let (router, _) = load_routes(Router::new(), modules)?;

    // Only handler JSON is shaped; static files and the OpenAPI document are served as-is
    let api = router
        .route("/health", get(handlers::health))
        .route("/api/catalog", get(handlers::catalog))
        .layer(middleware::from_fn_with_state(shaper, shape_json_response));

    Ok(api
        // Catalog UI
        .route("/", get(ui::handlers::index))
        .route("/endpoint/{index}", get(ui::handlers::open_endpoint))
        .route("/endpoint/{index}/execute", post(ui::handlers::execute_endpoint))
        .route("/theme/toggle", post(ui::handlers::toggle_theme))

        // OpenAPI document and Swagger UI
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))

        // Static files
        .route("/assets/{*path}", get(assets::asset_handler))
        .nest_service("/src", static_src)

        .fallback(not_found)

        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}
