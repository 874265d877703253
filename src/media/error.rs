/// Failures of the upload gate, the song catalog and the favorites index.
///
/// None of these are fatal to the process; the HTTP layer maps each kind to a
/// status code and reports it to the caller.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Declared media type is not an MP3 type. Raised before anything is written.
    #[error("invalid file type {0:?}: only MP3 audio is accepted")]
    InvalidFileType(String),
    /// Filename or title cannot be used as a single path component.
    #[error("invalid file name {0:?}")]
    InvalidFileName(String),
    /// A song id or favorite position that does not resolve.
    #[error("{0} not found")]
    NotFound(String),
    /// `AddFavorite` named a file that is not in the store root.
    #[error("song {0:?} does not exist")]
    SongNotFound(String),
    #[error("{0:?} is already a favorite")]
    AlreadyFavorite(String),
    /// Another song already owns this filename.
    #[error("a song named {0:?} already exists")]
    DuplicateTitle(String),
    #[error("file store I/O error: {0}")]
    Io(#[from] std::io::Error),
}
