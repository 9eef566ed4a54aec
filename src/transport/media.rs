use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("no audio output available: {0}")]
    NoOutput(#[source] rodio::StreamError),
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
    #[error("nothing is loaded")]
    NotLoaded,
}

/// The single playback primitive a [`Transport`](super::Transport) drives.
///
/// At most one resource is loaded at a time; loading a new one releases the
/// previous one.
pub trait Media {
    /// Load `path` paused at the start. `duration_hint` is used when the
    /// decoder cannot report a length.
    fn load(&mut self, path: &Path, duration_hint: Option<Duration>) -> Result<(), MediaError>;
    /// Start or resume playback of the loaded resource.
    fn play(&mut self) -> Result<(), MediaError>;
    fn pause(&mut self);
    fn is_loaded(&self) -> bool;
    fn position(&self) -> Duration;
    fn set_position(&mut self, position: Duration);
    /// Length of the loaded resource, when known.
    fn duration(&self) -> Option<Duration>;
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    /// Returns `true` once after the loaded resource played to its end.
    fn take_ended(&mut self) -> bool;
    /// Stop playback and clear the source.
    fn unload(&mut self);
}
