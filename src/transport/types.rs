//! Playback state shared with the UI and MPRIS.

/// Coarse player status, derived from [`PlaybackState`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlayerStatus {
    /// No track selected.
    #[default]
    Idle,
    Playing,
    Paused,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    /// Index into the transport's active track list.
    pub current_track_index: Option<usize>,
    pub is_playing: bool,
    /// Volume fraction in `[0, 1]`.
    pub volume: f32,
    pub muted: bool,
    /// Elapsed time divided by track duration, in `[0, 1]`.
    pub position_fraction: f64,
    pub shuffle: bool,
    /// Repeat the current track when it ends.
    pub repeat: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_track_index: None,
            is_playing: false,
            volume: 1.0,
            muted: false,
            position_fraction: 0.0,
            shuffle: false,
            repeat: false,
        }
    }
}

impl PlaybackState {
    pub fn status(&self) -> PlayerStatus {
        match (self.current_track_index, self.is_playing) {
            (None, _) => PlayerStatus::Idle,
            (Some(_), true) => PlayerStatus::Playing,
            (Some(_), false) => PlayerStatus::Paused,
        }
    }
}
