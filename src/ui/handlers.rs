//! Catalog UI page handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, uri::Authority, HeaderMap, HeaderName, HeaderValue},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Datelike;
use reqwest::Url;
use serde::Deserialize;

use super::execute::{self, TryItPanel};
use super::render::{render_page, PageView, STATE_CATEGORY_FIELD, STATE_QUERY_FIELD};
use super::theme::{os_prefers_dark, ThemePreference};
use super::widgets::ToastQueue;
use crate::api::{AppState, PageError};
use crate::catalog::{Catalog, CatalogState};

const ACCEPT_CH: HeaderName = HeaderName::from_static("accept-ch");

#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

impl CatalogQuery {
    fn state(&self) -> CatalogState {
        CatalogState::from_params(self.category.as_deref(), self.q.as_deref())
    }
}

/// Per-request page inputs other than the catalog itself
struct PageChrome {
    toasts: ToastQueue,
    theme: ThemePreference,
    origin: String,
}

/// Load the descriptor for this page view. A failure leaves the page without a
/// catalog and queues one error toast.
async fn load_page(state: &AppState, headers: &HeaderMap) -> (Option<Catalog>, PageChrome) {
    let mut toasts = ToastQueue::new(state.config.toast_ttl());
    let catalog = match state.source.load().await {
        Ok(catalog) => Some(catalog),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load descriptor for UI");
            toasts.error("Failed to load API documentation");
            None
        }
    };

    let chrome = PageChrome {
        toasts,
        theme: ThemePreference::from_headers(headers),
        origin: display_origin(state, headers),
    };
    (catalog, chrome)
}

fn render(
    catalog: Option<&Catalog>,
    chrome: &PageChrome,
    catalog_state: &CatalogState,
    panel: Option<&TryItPanel<'_>>,
) -> Response {
    let html = render_page(&PageView {
        catalog,
        state: catalog_state,
        theme: chrome.theme,
        origin: &chrome.origin,
        panel,
        toasts: &chrome.toasts,
        year: chrono::Utc::now().year(),
    });
    page_response(html)
}

fn page_response(html: String) -> Response {
    (
        [(ACCEPT_CH, HeaderValue::from_static("Sec-CH-Prefers-Color-Scheme"))],
        Html(html),
    )
        .into_response()
}

fn configured_origin(state: &AppState) -> Option<String> {
    state
        .config
        .public_url
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(|u| u.trim_end_matches('/').to_string())
}

/// Origin try-it requests are sent to: the configured public URL, else this
/// server on loopback. Request headers never choose the target.
pub fn invoke_origin(state: &AppState) -> String {
    configured_origin(state).unwrap_or_else(|| format!("http://127.0.0.1:{}", state.config.port))
}

/// Origin shown in endpoint URLs: the configured public URL, else the
/// request's `Host` when it is a plain authority
pub fn display_origin(state: &AppState, headers: &HeaderMap) -> String {
    if let Some(origin) = configured_origin(state) {
        return origin;
    }

    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|host| host.parse::<Authority>().ok())
        .filter(|authority| !authority.as_str().contains('@'))
        .map(|authority| format!("http://{authority}"))
        .unwrap_or_else(|| invoke_origin(state))
}

fn parse_index(raw: &str) -> Result<usize, PageError> {
    raw.parse().map_err(|_| PageError::NotFound)
}

/// `GET /`
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
    headers: HeaderMap,
) -> Response {
    let (catalog, chrome) = load_page(&state, &headers).await;
    render(catalog.as_ref(), &chrome, &query.state(), None)
}

/// `GET /endpoint/{index}`: open the try-it modal
pub async fn open_endpoint(
    State(state): State<AppState>,
    Path(index): Path<String>,
    Query(query): Query<CatalogQuery>,
    headers: HeaderMap,
) -> Result<Response, PageError> {
    let index = parse_index(&index)?;
    let (catalog, chrome) = load_page(&state, &headers).await;
    let catalog_state = query.state();

    let Some(catalog) = catalog else {
        return Ok(render(None, &chrome, &catalog_state, None));
    };
    let record = catalog.get(index).ok_or(PageError::NotFound)?;

    let panel = TryItPanel::open(index, record);
    Ok(render(Some(&catalog), &chrome, &catalog_state, Some(&panel)))
}

/// `POST /endpoint/{index}/execute`: validate and run the request
pub async fn execute_endpoint(
    State(state): State<AppState>,
    Path(index): Path<String>,
    headers: HeaderMap,
    Form(form): Form<Vec<(String, String)>>,
) -> Result<Response, PageError> {
    let index = parse_index(&index)?;
    let (catalog, mut chrome) = load_page(&state, &headers).await;

    let field = |name: &str| {
        form.iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    let catalog_state =
        CatalogState::from_params(field(STATE_CATEGORY_FIELD), field(STATE_QUERY_FIELD));

    let Some(catalog) = catalog else {
        return Ok(render(None, &chrome, &catalog_state, None));
    };
    let record = catalog.get(index).ok_or(PageError::NotFound)?;

    let mut panel = TryItPanel::open(index, record);
    execute::execute(
        &mut panel,
        &form,
        &invoke_origin(&state),
        state.invoker.as_ref(),
        &mut chrome.toasts,
    )
    .await;

    Ok(render(Some(&catalog), &chrome, &catalog_state, Some(&panel)))
}

/// `POST /theme/toggle`: persist the flipped theme and go back
pub async fn toggle_theme(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let current = ThemePreference::from_headers(&headers);
    let next = current.toggled(os_prefers_dark(&headers));
    tracing::debug!(from = ?current, to = ?next, "Theme toggled");

    let target = back_target(&display_origin(&state, &headers), &headers);
    match next.cookie() {
        Some(cookie) => (
            AppendHeaders([(header::SET_COOKIE, cookie)]),
            Redirect::to(&target),
        )
            .into_response(),
        None => Redirect::to(&target).into_response(),
    }
}

/// Path and query of the referring page when it shares `origin`, `/` otherwise
fn back_target(origin: &str, headers: &HeaderMap) -> String {
    let Ok(own) = Url::parse(origin) else {
        return "/".to_string();
    };

    headers
        .get(header::REFERER)
        .and_then(|v| v.to_str().ok())
        .and_then(|referer| Url::parse(referer).ok())
        .filter(|url| url.origin() == own.origin())
        .filter(|url| !url.path().starts_with("//"))
        .map(|url| match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        })
        .unwrap_or_else(|| "/".to_string())
}
