//! Response shaping: every JSON object reply carries `status` and `creator`

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Upper bound on JSON bodies the shaper will buffer
const MAX_SHAPED_BODY: usize = 16 * 1024 * 1024;

/// Creator injected into every JSON object reply
#[derive(Debug, Clone)]
pub struct ResponseShaper {
    creator: Arc<str>,
}

impl ResponseShaper {
    pub fn new(creator: &str) -> Self {
        Self {
            creator: Arc::from(creator),
        }
    }

    pub fn creator(&self) -> &str {
        &self.creator
    }

    /// `status` first (when present), then `creator`, then the original fields.
    /// Original keys win; non-objects pass through.
    pub fn shape(&self, payload: Value) -> Value {
        match payload {
            Value::Object(original) => {
                let mut shaped = Map::with_capacity(original.len() + 2);
                if let Some(status) = original.get("status") {
                    shaped.insert("status".to_owned(), status.clone());
                }
                shaped.insert("creator".to_owned(), Value::String(self.creator.to_string()));
                for (key, value) in original {
                    shaped.insert(key, value);
                }
                Value::Object(shaped)
            }
            other => other,
        }
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Middleware rewriting JSON bodies through [`ResponseShaper::shape`]
pub async fn shape_json_response(
    State(shaper): State<ResponseShaper>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !is_json(response.headers()) {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_SHAPED_BODY).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, "Failed to buffer JSON response");
            return super::error::server_error_response();
        }
    };

    let payload: Value = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(_) => return Response::from_parts(parts, Body::from(bytes)),
    };

    match serde_json::to_vec_pretty(&shaper.shape(payload)) {
        Ok(shaped) => {
            parts.headers.remove(header::CONTENT_LENGTH);
            Response::from_parts(parts, Body::from(shaped))
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode shaped response");
            super::error::server_error_response().into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Json, Router};
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    #[test]
    fn test_injects_creator_after_status() {
        let shaper = ResponseShaper::new("X");
        let shaped = shaper.shape(json!({"status": true, "data": {}}));
        assert_eq!(shaped, json!({"status": true, "creator": "X", "data": {}}));

        let keys: Vec<_> = shaped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["status", "creator", "data"]);
    }

    #[test]
    fn test_original_creator_wins() {
        let shaper = ResponseShaper::new("X");
        let shaped = shaper.shape(json!({"status": true, "creator": "custom"}));
        assert_eq!(shaped["creator"], "custom");
        assert_eq!(shaped["status"], true);
    }

    #[test]
    fn test_missing_status_is_not_invented() {
        let shaper = ResponseShaper::new("X");
        let shaped = shaper.shape(json!({"data": [1, 2]}));
        let keys: Vec<_> = shaped.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["creator", "data"]);
    }

    #[test]
    fn test_non_objects_pass_through() {
        let shaper = ResponseShaper::new("X");
        assert_eq!(shaper.shape(json!([1, 2, 3])), json!([1, 2, 3]));
        assert_eq!(shaper.shape(json!("text")), json!("text"));
        assert_eq!(shaper.shape(Value::Null), Value::Null);
    }

    fn app() -> Router {
        Router::new()
            .route("/json", get(|| async { Json(json!({"status": true, "data": {}})) }))
            .route("/list", get(|| async { Json(json!(["a", "b"])) }))
            .route("/text", get(|| async { "plain" }))
            .layer(middleware::from_fn_with_state(
                ResponseShaper::new("Elle"),
                shape_json_response,
            ))
    }

    async fn get_body(uri: &str) -> Vec<u8> {
        let response = app()
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_middleware_rewrites_json() {
        let json: Value = serde_json::from_slice(&get_body("/json").await).unwrap();
        assert_eq!(json, json!({"status": true, "creator": "Elle", "data": {}}));
    }

    #[tokio::test]
    async fn test_middleware_leaves_arrays_and_text() {
        let json: Value = serde_json::from_slice(&get_body("/list").await).unwrap();
        assert_eq!(json, json!(["a", "b"]));
        assert_eq!(get_body("/text").await, b"plain");
    }
}
