use axum::extract::Multipart;

use crate::http::error::ApiError;
use crate::media::upload::{Edit, IncomingFile};

/// Collect the `file`, `title` and `desc` parts of a multipart form.
///
/// Blank text fields count as absent. A file part with neither a filename
/// nor content is what browsers send when no file was picked, so it is
/// ignored too. Unknown parts are skipped.
pub async fn read_edit(mut multipart: Multipart) -> Result<Edit, ApiError> {
    let mut edit = Edit::default();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await?;
                if filename.is_empty() && bytes.is_empty() {
                    continue;
                }
                edit.file = Some(IncomingFile {
                    bytes: bytes.to_vec(),
                    media_type,
                    filename,
                });
            }
            "title" => edit.title = non_blank(field.text().await?),
            "desc" => edit.desc = non_blank(field.text().await?),
            other => tracing::debug!("Ignoring form field {:?}", other),
        }
    }
    Ok(edit)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
