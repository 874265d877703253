use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::media::error::MediaError;

/// Name of the favorites sub-directory inside the store root.
pub const FAVORITES_DIR: &str = "favorites";

/// Prefix of in-flight temp files. Dot-prefixed so favorites listings skip them.
const STAGING_PREFIX: &str = ".staging-";

/// On-disk media directory: song files in the root, favorite copies in
/// `favorites/`. Holds only paths, so it is cheap to clone; locking is the
/// caller's job.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    favorites: PathBuf,
}

impl FileStore {
    /// Open the store at `root`, creating the directory if it is absent.
    /// `favorites/` is created lazily on first favorites access.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let favorites = root.join(FAVORITES_DIR);
        Ok(Self { root, favorites })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn favorites_dir(&self) -> &Path {
        &self.favorites
    }

    pub fn song_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn favorite_path(&self, name: &str) -> PathBuf {
        self.favorites.join(name)
    }

    pub fn ensure_favorites(&self) -> io::Result<()> {
        fs::create_dir_all(&self.favorites)
    }

    /// List favorite filenames in lexicographic order.
    ///
    /// Sorting pins positions to something reproducible instead of whatever
    /// order the filesystem enumerates in. Hidden entries (including staging
    /// files) and anything that is not a regular file are left out, as are
    /// names that are not valid UTF-8.
    pub fn list_favorites(&self) -> io::Result<Vec<String>> {
        self.ensure_favorites()?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.favorites)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                tracing::warn!("Skipping non UTF-8 favorite: {:?}", entry.file_name());
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            names.push(name);
        }
        names.sort();
        Ok(names)
    }

    /// Write `bytes` into `dir` under a hidden temp name, ready to be moved
    /// into place with [`NamedTempFile::persist`]. Dropping the handle
    /// removes the temp file.
    pub fn stage(&self, dir: &Path, bytes: &[u8]) -> io::Result<NamedTempFile> {
        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(dir)?;
        staged.write_all(bytes)?;
        staged.as_file().sync_all()?;
        Ok(staged)
    }

    /// Stage `bytes` and rename them to `target`, failing with
    /// `ErrorKind::AlreadyExists` instead of overwriting an existing file.
    pub fn write_new(&self, target: &Path, bytes: &[u8]) -> io::Result<()> {
        let dir = target.parent().unwrap_or(self.root.as_path());
        let staged = self.stage(dir, bytes)?;
        staged.persist_noclobber(target)?;
        Ok(())
    }

    /// Copy `source` to `target` through a staging file in the target's
    /// directory. Fails with `ErrorKind::AlreadyExists` if `target` exists.
    pub fn copy_new(&self, source: &Path, target: &Path) -> io::Result<()> {
        let dir = target.parent().unwrap_or(self.root.as_path());
        let mut staged = tempfile::Builder::new()
            .prefix(STAGING_PREFIX)
            .tempfile_in(dir)?;
        let mut reader = fs::File::open(source)?;
        io::copy(&mut reader, &mut staged)?;
        staged.as_file().sync_all()?;
        staged.persist_noclobber(target)?;
        Ok(())
    }

    /// Delete the file at `target` and move `staged` into its place under
    /// `renamed_to`. The old file is gone before the rename happens; a failed
    /// rename leaves neither name behind.
    pub fn replace(&self, staged: NamedTempFile, target: &Path, renamed_to: &Path) -> io::Result<()> {
        remove_if_exists(target)?;
        staged.persist(renamed_to)?;
        Ok(())
    }
}

/// Remove a file, treating "already gone" as success.
/// Returns whether a file was actually removed.
pub fn remove_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Check that `name` is usable as a single path component inside the store.
///
/// Rejects separators, NUL, `.`/`..` and dot-prefixed names (hidden names are
/// reserved for staging files and would never show up in a favorites listing).
pub fn validate_name(name: &str) -> Result<(), MediaError> {
    let bad = name.trim().is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\', '\0']);
    if bad {
        return Err(MediaError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// [`validate_name`] plus the names reserved in the store root: a song file
/// called `favorites` would block the favorites directory from ever being
/// created. Compared case-insensitively for case-folding filesystems.
pub fn validate_song_name(name: &str) -> Result<(), MediaError> {
    validate_name(name)?;
    if name.trim().eq_ignore_ascii_case(FAVORITES_DIR) {
        return Err(MediaError::InvalidFileName(name.to_string()));
    }
    Ok(())
}

/// Keep only the final component of a client-supplied filename, so
/// `../../etc/passwd` becomes `passwd`. Both `/` and `\` count as separators.
pub fn neutralize_filename(raw: &str) -> Result<String, MediaError> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default().trim();
    validate_name(base).map_err(|_| MediaError::InvalidFileName(raw.to_string()))?;
    Ok(base.to_string())
}

/// Extension of `name` without the dot, if any.
pub fn extension_of(name: &str) -> Option<&str> {
    Path::new(name).extension().and_then(|e| e.to_str())
}

/// Build a filename from a new title and the original file's extension.
/// A title that already carries that extension is not suffixed twice.
pub fn retitle(title: &str, extension: Option<&str>) -> String {
    let title = title.trim();
    match extension {
        Some(ext) if !title_has_extension(title, ext) => format!("{title}.{ext}"),
        _ => title.to_string(),
    }
}

fn title_has_extension(title: &str, ext: &str) -> bool {
    extension_of(title).is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

