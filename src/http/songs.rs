use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::http::error::ApiError;
use crate::http::form::read_edit;
use crate::http::state::AppState;
use crate::http::Message;
use crate::media::catalog::Song;

/// POST /songs — multipart `file` plus optional `title` and `desc`.
pub async fn upload_song(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Song>), ApiError> {
    let edit = read_edit(multipart).await?;
    let Some(file) = edit.file else {
        return Err(ApiError::BadRequest("missing \"file\" part".to_string()));
    };
    let (title, desc) = (edit.title, edit.desc);
    let song = state.run(move |lib| lib.upload(file, title, desc)).await?;
    Ok((StatusCode::CREATED, Json(song)))
}

/// GET /songs
pub async fn list_songs(State(state): State<AppState>) -> Json<Vec<Song>> {
    Json(state.library.songs())
}

/// PUT /songs/{id} — multipart with any of `title`, `desc`, `file`.
pub async fn update_song(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    multipart: Multipart,
) -> Result<Json<Song>, ApiError> {
    let edit = read_edit(multipart).await?;
    let song = state.run(move |lib| lib.update_song(id, edit)).await?;
    Ok(Json(song))
}

/// DELETE /songs/{id}
pub async fn delete_song(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Message>, ApiError> {
    state.run(move |lib| lib.delete_song(id)).await?;
    Ok(Message::json(format!("song {id} deleted")))
}
