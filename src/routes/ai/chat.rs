//! `GET /ai/chat`: canned assistant replies

use axum::{extract::Query, routing::get, Json, Router};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{ApiError, AppState, ErrorEnvelope};
use crate::error::Result;
use crate::routes::RouteModule;

pub const MODULE: RouteModule = RouteModule {
    category: "ai",
    name: "chat",
    register,
};

pub const MODEL: &str = "elle-ai-v1";

pub const RESPONSES: &[&str] = &[
    "Hello! I'm Elle AI, how can I help you today?",
    "That's an interesting question! Let me think about that...",
    "I understand what you're asking. Here's my response:",
    "Great question! Based on my knowledge, I can tell you that...",
    "I'm here to help! Let me provide you with some information:",
];

fn register(router: Router<AppState>) -> Result<Router<AppState>> {
    Ok(router.route("/ai/chat", get(chat)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ChatParams {
    /// Message sent to the assistant
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatReply {
    /// Canned reply text
    pub message: String,
    /// ISO 8601 timestamp
    pub timestamp: String,
    /// Model identifier
    pub model: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    pub status: bool,
    pub data: ChatReply,
}

/// Chat with the stub assistant
#[utoipa::path(
    get,
    path = "/ai/chat",
    params(ChatParams),
    responses(
        (status = 200, description = "Assistant reply", body = ChatResponse),
        (status = 400, description = "Missing message", body = ErrorEnvelope),
        (status = 500, description = "Internal error", body = ErrorEnvelope)
    ),
    tag = "ai"
)]
pub async fn chat(Query(params): Query<ChatParams>) -> std::result::Result<Json<ChatResponse>, ApiError> {
    let message = params.message.unwrap_or_default();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message parameter is required".into()));
    }

    let reply = pick_reply().ok_or_else(|| anyhow::anyhow!("No canned responses configured"))?;
    tracing::debug!(chars = message.chars().count(), "Answering chat message");

    Ok(Json(ChatResponse {
        status: true,
        data: ChatReply {
            message: reply.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            model: MODEL.to_string(),
        },
    }))
}

fn pick_reply() -> Option<&'static str> {
    if RESPONSES.is_empty() {
        return None;
    }
    RESPONSES.get(fastrand::usize(..RESPONSES.len())).copied()
}
