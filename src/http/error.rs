use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::media::error::MediaError;

/// Everything a handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Media(#[from] MediaError),
    #[error("malformed form data: {0}")]
    Form(#[from] MultipartError),
    #[error("{0}")]
    BadRequest(String),
    #[error("worker task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Media(e) => match e {
                MediaError::InvalidFileType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                MediaError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
                MediaError::NotFound(_) | MediaError::SongNotFound(_) => StatusCode::NOT_FOUND,
                MediaError::AlreadyFavorite(_) | MediaError::DuplicateTitle(_) => {
                    StatusCode::CONFLICT
                }
                MediaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Form(e) => e.status(),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Join(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected ({}): {}", status.as_u16(), self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}
