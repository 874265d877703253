//! Small media-library backend: accept MP3 uploads, keep a volatile song
//! catalog, and manage a folder of favorite copies addressed by position.

pub mod cli;
pub mod config;
pub mod http;
pub mod media;
