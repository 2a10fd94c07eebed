use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::advisor::ChatRequest;
use crate::state::AppState;

/// Success envelope for an advisory reply. Failures render through
/// `AppError` as `{success: false, message}` with the mapped status.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
}

/// `POST /chat` — forward a question or analysis request to the AI
/// provider. Every downstream failure is normalized to the JSON failure
/// envelope at this boundary; nothing propagates past it.
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> AppResult<Json<ChatResponse>> {
    if request.is_empty() {
        return Err(AppError::Validation(
            "Either message or data must be provided".into(),
        ));
    }

    let response = state.advisor.chat(&request).await?;

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}
