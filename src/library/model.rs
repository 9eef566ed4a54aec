use std::path::{Path, PathBuf};
use std::time::Duration;

/// A playable item. Never mutated once the library produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: u64,
    pub title: String,
    pub artist: String,
    pub genre: String,
    /// Location of the audio resource, as stored by the library source.
    pub file_path: PathBuf,
    pub likes_count: u64,
    pub duration: Option<Duration>,
}

impl Track {
    /// Resolve `file_path` against `media_root` when it is relative.
    pub fn resource(&self, media_root: Option<&Path>) -> PathBuf {
        match media_root {
            Some(root) if self.file_path.is_relative() => root.join(&self.file_path),
            _ => self.file_path.clone(),
        }
    }

    /// `Artist - Title`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} - {}", artist, self.title)
        }
    }
}
