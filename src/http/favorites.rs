use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::form::read_edit;
use crate::http::state::AppState;
use crate::http::Message;
use crate::media::favorites::Favorite;

#[derive(Debug, Deserialize)]
pub struct AddFavorite {
    pub title: String,
}

/// GET /favorites
pub async fn list_favorites(State(state): State<AppState>) -> Result<Json<Vec<Favorite>>, ApiError> {
    let favorites = state.run(|lib| lib.favorites()).await?;
    Ok(Json(favorites))
}

/// POST /favorites — `{"title": "<song filename>"}`
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(body): Json<AddFavorite>,
) -> Result<(StatusCode, Json<Message>), ApiError> {
    let title = body.title;
    let message = format!("{title} added to favorites");
    state.run(move |lib| lib.add_favorite(&title)).await?;
    Ok((StatusCode::CREATED, Message::json(message)))
}

/// PUT /favorites/{position}
pub async fn update_favorite(
    State(state): State<AppState>,
    Path(position): Path<usize>,
    multipart: Multipart,
) -> Result<Json<Favorite>, ApiError> {
    let edit = read_edit(multipart).await?;
    let favorite = state.run(move |lib| lib.update_favorite(position, edit)).await?;
    Ok(Json(favorite))
}

/// DELETE /favorites/{position}
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(position): Path<usize>,
) -> Result<Json<Message>, ApiError> {
    state.run(move |lib| lib.remove_favorite(position)).await?;
    Ok(Message::json(format!("favorite {position} removed")))
}
