//! REST API server for the support chat assistant
//!
//! Exposes the chat pipeline, history, and analytics via HTTP endpoints
//! Integrates with frontend UI

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::error::AssistantError;
use crate::models::Turn;
use crate::session::ChatSession;

/// =============================
/// Request Models
/// =============================

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatRequest {
    pub message: String,
}

/// =============================
/// Response Wrapper
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    /// The mutex serializes submissions: one message is processed
    /// end-to-end against the log before the next may begin.
    pub session: Arc<Mutex<ChatSession>>,
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Chat Endpoint
/// =============================

async fn chat_handler(
    State(state): State<ApiState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ApiResponse>) {
    info!("Received chat message");

    let mut session = state.session.lock().await;

    match session.handle_message(&req.message).await {
        Ok(exchange) => (StatusCode::OK, Json(ApiResponse::success(exchange))),
        Err(e @ AssistantError::InvalidInput(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(e.to_string())),
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::error(format!("Chat pipeline failed: {}", e))),
        ),
    }
}

/// =============================
/// History Endpoint
/// =============================

async fn history_handler(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let session = state.session.lock().await;
    let turns: Vec<Turn> = session.history().turns().cloned().collect();

    (StatusCode::OK, Json(ApiResponse::success(turns)))
}

/// =============================
/// Analytics Endpoint
/// =============================

async fn analytics_handler(State(state): State<ApiState>) -> (StatusCode, Json<ApiResponse>) {
    let session = state.session.lock().await;

    (StatusCode::OK, Json(ApiResponse::success(session.analytics())))
}

/// =============================
/// Router
/// =============================

pub fn create_router(session: Arc<Mutex<ChatSession>>) -> Router {
    let state = ApiState { session };

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat_handler))
        .route("/api/history", get(history_handler))
        .route("/api/analytics", get(analytics_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    session: Arc<Mutex<ChatSession>>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(session);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
