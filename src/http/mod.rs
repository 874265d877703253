pub mod error;
pub mod favorites;
pub mod form;
pub mod songs;
pub mod state;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::state::AppState;

/// Confirmation body for operations that return nothing else.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn json(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    // Uploaded songs and favorite copies are readable by name under /files.
    let files = ServeDir::new(state.library.store().root());
    Router::new()
        .route("/songs", get(songs::list_songs).post(songs::upload_song))
        .route("/songs/{id}", put(songs::update_song).delete(songs::delete_song))
        .route(
            "/favorites",
            get(favorites::list_favorites).post(favorites::add_favorite),
        )
        .route(
            "/favorites/{id}",
            put(favorites::update_favorite).delete(favorites::remove_favorite),
        )
        .nest_service("/files", files)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
