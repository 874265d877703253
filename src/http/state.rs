use std::sync::Arc;

use crate::http::error::ApiError;
use crate::media::error::MediaError;
use crate::media::library::MediaLibrary;

/// Shared application state injected into all route handlers via axum::extract::State.
/// Arc provides cheap clone; the library does its own per-directory locking.
#[derive(Clone)]
pub struct AppState {
    pub library: Arc<MediaLibrary>,
    /// Request body cap for uploads and JSON bodies.
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(library: MediaLibrary, max_upload_bytes: usize) -> Self {
        Self {
            library: Arc::new(library),
            max_upload_bytes,
        }
    }

    /// Run a library operation on the blocking pool. Library calls do
    /// synchronous filesystem work and may wait on a directory lock, so
    /// they stay off the async worker threads.
    pub async fn run<T, F>(&self, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&MediaLibrary) -> Result<T, MediaError> + Send + 'static,
        T: Send + 'static,
    {
        let library = Arc::clone(&self.library);
        let result = tokio::task::spawn_blocking(move || op(&*library)).await?;
        Ok(result?)
    }
}
