use chrono::{DateTime, Utc};
use serde::Serialize;

/// Description given to songs uploaded without one, and to every favorite.
pub const DEFAULT_DESC: &str = "No descriptions are here";

/// One uploaded song. `title` doubles as the backing file's name in the
/// store root, extension included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: u64,
    pub title: String,
    pub desc: String,
    pub updated_at: DateTime<Utc>,
}

/// In-memory, insertion-ordered song records for the life of the process.
///
/// Ids come from a counter that only moves forward, so a deleted song's id
/// is never handed out again.
#[derive(Debug)]
pub struct SongCatalog {
    songs: Vec<Song>,
    next_id: u64,
}

impl Default for SongCatalog {
    fn default() -> Self {
        Self {
            songs: Vec::new(),
            next_id: 1,
        }
    }
}

impl SongCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn list(&self) -> &[Song] {
        &self.songs
    }

    pub fn get(&self, id: u64) -> Option<&Song> {
        self.songs.iter().find(|s| s.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Song> {
        self.songs.iter_mut().find(|s| s.id == id)
    }

    /// True when a song other than `except` is titled `title`.
    pub fn title_taken(&self, title: &str, except: Option<u64>) -> bool {
        self.songs
            .iter()
            .any(|s| s.title == title && Some(s.id) != except)
    }

    /// Append a new song and return a copy of it.
    pub fn insert(&mut self, title: String, desc: Option<String>) -> Song {
        let song = Song {
            id: self.next_id,
            title,
            desc: desc.unwrap_or_else(|| DEFAULT_DESC.to_string()),
            updated_at: Utc::now(),
        };
        self.next_id += 1;
        self.songs.push(song.clone());
        song
    }

    pub fn remove(&mut self, id: u64) -> Option<Song> {
        let idx = self.songs.iter().position(|s| s.id == id)?;
        Some(self.songs.remove(idx))
    }
}
