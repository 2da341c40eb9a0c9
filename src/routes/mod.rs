mod health;
mod listening;
mod words;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;

use crate::response::json_error;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(banner))
        .nest("/api/words", words::router())
        .nest("/api/listening", listening::router())
        .nest("/health", health::router())
        .nest("/api/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

async fn banner() -> &'static str {
    "LexiDeck API is running."
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "Endpoint not found.").into_response()
}
