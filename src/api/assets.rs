//! Embedded static assets (stylesheet and error pages)

use axum::{
    extract::Path,
    http::header,
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "assets"]
struct Asset;

#[derive(Debug, Clone, Copy)]
pub enum ErrorPage {
    NotFound,
    ServerError,
}

impl ErrorPage {
    fn file(self) -> &'static str {
        match self {
            Self::NotFound => "404.html",
            Self::ServerError => "500.html",
        }
    }

    fn fallback(self) -> &'static str {
        match self {
            Self::NotFound => "<h1>404</h1><p>Page not found</p>",
            Self::ServerError => "<h1>500</h1><p>Internal server error</p>",
        }
    }
}

/// HTML for one of the custom error pages
pub fn error_page(page: ErrorPage) -> String {
    match Asset::get(page.file()) {
        Some(content) => String::from_utf8_lossy(&content.data).into_owned(),
        None => page.fallback().to_string(),
    }
}

/// Serves files from the embedded `assets` directory under `/assets/`
pub async fn asset_handler(Path(path): Path<String>) -> Response {
    match Asset::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => super::error::not_found_response(),
    }
}
