use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/melodicstream/config.toml` or
/// `~/.config/melodicstream/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `MELODICSTREAM__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub controls: ControlsSettings,
    pub playback: PlaybackSettings,
    pub ui: UiSettings,
    pub library: LibrarySettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Volume applied when the player starts, as a fraction in `[0, 1]`.
    pub initial_volume: f32,
    /// Interval between progress polls (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.7,
            tick_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Fraction of the track to jump when pressing the arrow keys.
    pub seek_step: f64,
    /// Past this position fraction, "previous" restarts the current track
    /// instead of moving to the prior one.
    pub restart_threshold: f64,
    /// Volume change applied by `+` / `-`.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step: 0.05,
            restart_threshold: 0.1,
            volume_step: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Whether shuffle starts enabled.
    pub shuffle: bool,
    /// Whether repeat-one starts enabled.
    pub repeat: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Show the genre column in the track list.
    pub show_genre: bool,
    /// Show the likes column in the track list.
    pub show_likes: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ MelodicStream ~ ".to_string(),
            show_genre: true,
            show_likes: true,
        }
    }
}

/// Where the track list comes from.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LibrarySource {
    /// Walk a music directory and read tags.
    #[default]
    Scan,
    /// Read a JSON export of the MelodicStream backend's music list.
    Catalog,
}

/// Ordering applied to the visible track list.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Keep the order the library produced.
    #[default]
    Catalog,
    Title,
    Artist,
    #[serde(alias = "most_liked", alias = "likes")]
    MostLiked,
}

impl SortKey {
    /// The next key in the `o` cycle.
    pub fn cycle(self) -> Self {
        match self {
            SortKey::Catalog => SortKey::Title,
            SortKey::Title => SortKey::Artist,
            SortKey::Artist => SortKey::MostLiked,
            SortKey::MostLiked => SortKey::Catalog,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Catalog => "Catalog",
            SortKey::Title => "Title",
            SortKey::Artist => "Artist",
            SortKey::MostLiked => "Most liked",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub source: LibrarySource,
    /// JSON catalog file, required when `source = "catalog"`.
    pub catalog_path: Option<PathBuf>,
    /// Base directory for relative `filePath` entries. Defaults to the
    /// catalog's own directory.
    pub media_root: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Initial ordering of the visible list.
    pub sort: SortKey,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            source: LibrarySource::Scan,
            catalog_path: None,
            media_root: None,
            extensions: vec!["mp3".into(), "flac".into(), "wav".into(), "ogg".into()],
            follow_links: true,
            include_hidden: true,
            recursive: true,
            max_depth: None,
            sort: SortKey::Catalog,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Maximum level written to the log file (`error`, `warn`, `info`, `debug`, `trace`).
    pub level: String,
    /// Log file location. Defaults to `$XDG_STATE_HOME/melodicstream/melodicstream.log`.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
