use crate::media::error::MediaError;
use crate::media::mime;
use crate::media::store::{
    extension_of, neutralize_filename, retitle, validate_name, validate_song_name,
};

/// An uploaded file as handed over by the transport: raw bytes plus what the
/// client claimed about them.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub bytes: Vec<u8>,
    pub media_type: String,
    pub filename: String,
}

/// Optional changes carried by an update request for a song or a favorite.
#[derive(Debug, Clone, Default)]
pub struct Edit {
    pub title: Option<String>,
    pub desc: Option<String>,
    pub file: Option<IncomingFile>,
}

/// Upload gate: check the declared media type, then reduce the client's
/// filename to a bare name. Nothing touches the disk here, so a rejected
/// upload leaves no trace.
pub fn admit(file: &IncomingFile) -> Result<String, MediaError> {
    if !mime::is_mp3(&file.media_type) {
        tracing::warn!(
            "Rejecting upload {:?}: declared type {:?} is not MP3",
            file.filename,
            file.media_type
        );
        return Err(MediaError::InvalidFileType(file.media_type.clone()));
    }
    neutralize_filename(&file.filename)
}

/// Name an upload is stored under: the caller's title carrying the upload's
/// extension, or the neutralized filename when no title was given.
pub fn resolve_name(filename: &str, title: Option<&str>) -> Result<String, MediaError> {
    let name = match title {
        Some(title) => retitle(title, extension_of(filename)),
        None => filename.to_string(),
    };
    validate_song_name(&name)?;
    Ok(name)
}

/// Name a file is renamed to by an update: the new title (or the current
/// stem when no title was given) with the current file's extension.
pub fn rename_target(current: &str, title: Option<&str>) -> Result<String, MediaError> {
    let target = match title {
        Some(title) => retitle(title, extension_of(current)),
        None => current.to_string(),
    };
    validate_name(&target)?;
    Ok(target)
}
