//! HTTP error responses: JSON envelopes for API routes, HTML pages for the UI

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::assets::{error_page, ErrorPage};

/// Failure body returned by API routes
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    /// Always false
    pub status: bool,
    /// Error message
    pub error: String,
}

/// Error type for JSON route handlers.
///
/// `Internal` logs the cause and answers with a fixed message.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "Handler failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_owned())
            }
        };
        let body = ErrorEnvelope {
            status: false,
            error: message,
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

/// Error type for UI page handlers, rendered as the custom error pages
#[derive(Debug)]
pub enum PageError {
    NotFound,
    Internal(anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => not_found_response(),
            Self::Internal(err) => {
                tracing::error!(error = ?err, "Page handler failed");
                server_error_response()
            }
        }
    }
}

impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

pub fn not_found_response() -> Response {
    (StatusCode::NOT_FOUND, Html(error_page(ErrorPage::NotFound))).into_response()
}

pub fn server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html(error_page(ErrorPage::ServerError)),
    )
        .into_response()
}

/// Fallback for unmatched paths
pub async fn not_found() -> Response {
    not_found_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_envelope() {
        let response = ApiError::BadRequest("Message parameter is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["status"], false);
        assert_eq!(json["error"], "Message parameter is required");
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let response = ApiError::from(anyhow::anyhow!("database password leaked")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Internal server error");
    }

    #[tokio::test]
    async fn test_page_errors_render_html() {
        let response = PageError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = PageError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(String::from_utf8_lossy(&bytes).contains("500"));
    }
}
