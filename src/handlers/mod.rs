pub mod chat;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}
