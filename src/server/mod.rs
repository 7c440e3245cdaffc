use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::app::AppState;
use crate::chat::{ChatError, ChatRequest};
use crate::error::Result;

/// Body of every non-success response.
#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/chat", post(create_chat))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(state: Arc<AppState>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config().server.host,
        state.config().server.port
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn create_chat(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let request_id = Uuid::new_v4();

    if let Err(err) = request.validate(state.config().max_message_length) {
        warn!(%request_id, "Rejected chat request: {}", err);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorBody {
                detail: err.to_string(),
            }),
        )
            .into_response();
    }

    match state.chat_service().generate_response(&request).await {
        Ok(response) => {
            info!(%request_id, model = %request.model, "Chat request completed");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(err) => {
            warn!(%request_id, model = %request.model, "Chat request failed: {}", err);
            err.into_response()
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (
            status,
            Json(ErrorBody {
                detail: self.to_string(),
            }),
        )
            .into_response()
    }
}
