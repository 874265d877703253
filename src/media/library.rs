use std::io;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;

use crate::media::catalog::{Song, SongCatalog};
use crate::media::error::MediaError;
use crate::media::favorites::{Favorite, FavoritesIndex};
use crate::media::store::{remove_if_exists, validate_song_name, FileStore};
use crate::media::upload::{self, Edit, IncomingFile};

/// The media library: file store, song catalog and favorites index.
///
/// Built once at startup and shared with the HTTP handlers as
/// `Arc<MediaLibrary>`. The catalog mutex doubles as the lock on the store
/// root directory; the favorites index carries its own lock. When both are
/// needed the root lock is taken first.
///
/// All operations block on filesystem calls.
#[derive(Debug)]
pub struct MediaLibrary {
    store: FileStore,
    catalog: Mutex<SongCatalog>,
    favorites: FavoritesIndex,
}

impl MediaLibrary {
    /// Open (creating if needed) the store rooted at `root` with an empty catalog.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, MediaError> {
        let store = FileStore::open(root)?;
        Ok(Self {
            favorites: FavoritesIndex::new(store.clone()),
            catalog: Mutex::new(SongCatalog::new()),
            store,
        })
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    fn catalog(&self) -> MutexGuard<'_, SongCatalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// UploadSong. The file is written (temp file, then rename) before the
    /// catalog entry is appended, so a failed write never leaves a record
    /// without a file.
    pub fn upload(
        &self,
        file: IncomingFile,
        title: Option<String>,
        desc: Option<String>,
    ) -> Result<Song, MediaError> {
        let filename = upload::admit(&file)?;
        let name = upload::resolve_name(&filename, title.as_deref())?;

        let mut catalog = self.catalog();
        if catalog.title_taken(&name, None) {
            return Err(MediaError::DuplicateTitle(name));
        }
        match self.store.write_new(&self.store.song_path(&name), &file.bytes) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(MediaError::DuplicateTitle(name));
            }
            Err(e) => return Err(e.into()),
        }
        let song = catalog.insert(name, desc);
        tracing::info!("Uploaded song #{} {} ({} bytes)", song.id, song.title, file.bytes.len());
        Ok(song)
    }

    /// ListSongs, in upload order.
    pub fn songs(&self) -> Vec<Song> {
        self.catalog().list().to_vec()
    }

    /// UpdateSong. Renames the backing file to the new title (keeping its
    /// extension) or swaps in a replacement file under that name. The record
    /// changes only after the filesystem step succeeded.
    pub fn update_song(&self, id: u64, edit: Edit) -> Result<Song, MediaError> {
        if let Some(file) = &edit.file {
            upload::admit(file)?;
        }

        let mut catalog = self.catalog();
        let current = catalog
            .get(id)
            .map(|s| s.title.clone())
            .ok_or_else(|| MediaError::NotFound(format!("song #{id}")))?;
        let target = upload::rename_target(&current, edit.title.as_deref())?;
        validate_song_name(&target)?;
        let from = self.store.song_path(&current);
        let to = self.store.song_path(&target);
        if target != current && (catalog.title_taken(&target, Some(id)) || to.exists()) {
            return Err(MediaError::DuplicateTitle(target));
        }

        match &edit.file {
            Some(file) => {
                let staged = self.store.stage(self.store.root(), &file.bytes)?;
                self.store.replace(staged, &from, &to)?;
            }
            None if target != current => match std::fs::rename(&from, &to) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!("Song #{} has no backing file {}; renaming record only", id, from.display());
                }
                Err(e) => return Err(e.into()),
            },
            None => {}
        }

        let song = catalog
            .get_mut(id)
            .ok_or_else(|| MediaError::NotFound(format!("song #{id}")))?;
        song.title = target;
        if let Some(desc) = edit.desc {
            song.desc = desc;
        }
        song.updated_at = Utc::now();
        tracing::info!("Updated song #{} -> {}", id, song.title);
        Ok(song.clone())
    }

    /// DeleteSong. A backing file that is already gone is not an error.
    pub fn delete_song(&self, id: u64) -> Result<(), MediaError> {
        let mut catalog = self.catalog();
        let title = catalog
            .get(id)
            .map(|s| s.title.clone())
            .ok_or_else(|| MediaError::NotFound(format!("song #{id}")))?;
        if !remove_if_exists(&self.store.song_path(&title))? {
            tracing::debug!("song #{} had no backing file {}", id, title);
        }
        catalog.remove(id);
        tracing::info!("Deleted song #{} {}", id, title);
        Ok(())
    }

    /// ListFavorites.
    pub fn favorites(&self) -> Result<Vec<Favorite>, MediaError> {
        self.favorites.list()
    }

    /// AddFavorite. Holds the root lock so the source file cannot be renamed
    /// or deleted by a song update while it is copied.
    pub fn add_favorite(&self, title: &str) -> Result<(), MediaError> {
        let _root = self.catalog();
        self.favorites.add(title)
    }

    /// UpdateFavorite.
    pub fn update_favorite(&self, position: usize, edit: Edit) -> Result<Favorite, MediaError> {
        self.favorites.update(position, edit)
    }

    /// RemoveFavorite.
    pub fn remove_favorite(&self, position: usize) -> Result<(), MediaError> {
        self.favorites.remove(position)
    }
}
