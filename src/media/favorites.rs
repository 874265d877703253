use std::fs;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::media::catalog::DEFAULT_DESC;
use crate::media::error::MediaError;
use crate::media::store::{remove_if_exists, validate_name, FileStore};
use crate::media::upload::{self, Edit};

/// A favorite as seen in one listing of `favorites/`. Nothing about it is
/// stored: `id` is the 1-based position in the sorted listing at the time of
/// the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Favorite {
    pub id: usize,
    pub title: String,
    pub desc: String,
}

/// Positional view over the favorites directory.
///
/// Positions are only meaningful within one observation of the directory.
/// Every operation takes `dir_lock` before listing and holds it until its
/// filesystem change is done, so a position resolved by one request cannot
/// be shifted underneath it by another request in this process. Changes made
/// to the directory from outside the process are not covered.
#[derive(Debug)]
pub struct FavoritesIndex {
    store: FileStore,
    dir_lock: Mutex<()>,
}

impl FavoritesIndex {
    pub fn new(store: FileStore) -> Self {
        Self {
            store,
            dir_lock: Mutex::new(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded state is the directory itself; a panic elsewhere does
        // not leave anything in memory half-updated.
        self.dir_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current listing, positions starting at 1. Creates `favorites/` if missing.
    pub fn list(&self) -> Result<Vec<Favorite>, MediaError> {
        let _guard = self.lock();
        let names = self.store.list_favorites()?;
        Ok(names
            .into_iter()
            .enumerate()
            .map(|(i, title)| Favorite {
                id: i + 1,
                title,
                desc: DEFAULT_DESC.to_string(),
            })
            .collect())
    }

    /// Copy the song file `title` from the store root into `favorites/`.
    ///
    /// Callers must hold the root directory lock so the source cannot be
    /// renamed away mid-copy.
    pub fn add(&self, title: &str) -> Result<(), MediaError> {
        validate_name(title)?;
        let source = self.store.song_path(title);
        if !source.is_file() {
            return Err(MediaError::SongNotFound(title.to_string()));
        }

        let _guard = self.lock();
        self.store.ensure_favorites()?;
        let target = self.store.favorite_path(title);
        if target.exists() {
            return Err(MediaError::AlreadyFavorite(title.to_string()));
        }
        match self.store.copy_new(&source, &target) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(MediaError::AlreadyFavorite(title.to_string()));
            }
            Err(e) => return Err(e.into()),
        }
        tracing::debug!("favorited {}", title);
        Ok(())
    }

    /// Rename and/or replace the favorite at `position`.
    ///
    /// The new name is the given title plus the current file's extension.
    /// `desc` is echoed in the result but not kept anywhere: favorites have
    /// no metadata store. The returned `id` is the file's position after the
    /// change, which differs from `position` when a rename reorders it.
    pub fn update(&self, position: usize, edit: Edit) -> Result<Favorite, MediaError> {
        if let Some(file) = &edit.file {
            upload::admit(file)?;
        }

        let _guard = self.lock();
        let names = self.store.list_favorites()?;
        let current = resolve(&names, position)?;
        let target = upload::rename_target(current, edit.title.as_deref())?;
        let from = self.store.favorite_path(current);
        let to = self.store.favorite_path(&target);
        if target != current && to.exists() {
            return Err(MediaError::AlreadyFavorite(target));
        }

        match &edit.file {
            Some(file) => {
                let staged = self.store.stage(self.store.favorites_dir(), &file.bytes)?;
                self.store.replace(staged, &from, &to)?;
            }
            None if target != current => fs::rename(&from, &to)?,
            None => {}
        }
        // Re-list under the same lock: a rename can move the file, and the
        // returned id must address it in the next listing.
        let id = self
            .store
            .list_favorites()?
            .iter()
            .position(|name| *name == target)
            .map_or(position, |idx| idx + 1);
        tracing::debug!("favorite #{} {} -> #{} {}", position, current, id, target);

        Ok(Favorite {
            id,
            title: target,
            desc: edit.desc.unwrap_or_else(|| DEFAULT_DESC.to_string()),
        })
    }

    /// Delete the favorite at `position`.
    pub fn remove(&self, position: usize) -> Result<(), MediaError> {
        let _guard = self.lock();
        let names = self.store.list_favorites()?;
        let current = resolve(&names, position)?;
        remove_if_exists(&self.store.favorite_path(current))?;
        tracing::debug!("removed favorite #{} {}", position, current);
        Ok(())
    }
}

/// Map a 1-based position onto a listing.
fn resolve(names: &[String], position: usize) -> Result<&str, MediaError> {
    position
        .checked_sub(1)
        .and_then(|idx| names.get(idx))
        .map(String::as_str)
        .ok_or_else(|| MediaError::NotFound(format!("favorite #{position}")))
}
