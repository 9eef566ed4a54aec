use std::path::{Path, PathBuf};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::library::Track;

use super::media::Media;
use super::types::{PlaybackState, PlayerStatus};

/// Position fraction past which "previous" restarts the current track.
pub const DEFAULT_RESTART_THRESHOLD: f64 = 0.1;

/// Owns the playback state and the one media primitive it drives.
///
/// `current_track_index` always points into `tracks` (the active, filtered
/// list) or is `None`. Dropping the transport releases the media resource.
pub struct Transport<M: Media> {
    media: M,
    tracks: Vec<Track>,
    media_root: Option<PathBuf>,
    state: PlaybackState,
    restart_threshold: f64,
    rng: StdRng,
}

impl<M: Media> Transport<M> {
    pub fn new(mut media: M, volume: f32) -> Self {
        let volume = sanitize_volume(volume);
        let muted = volume == 0.0;
        media.set_volume(volume);
        media.set_muted(muted);

        Self {
            media,
            tracks: Vec::new(),
            media_root: None,
            state: PlaybackState {
                volume,
                muted,
                ..PlaybackState::default()
            },
            restart_threshold: DEFAULT_RESTART_THRESHOLD,
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_media_root(mut self, root: Option<PathBuf>) -> Self {
        self.media_root = root;
        self
    }

    pub fn with_restart_threshold(mut self, threshold: f64) -> Self {
        self.restart_threshold = threshold;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn status(&self) -> PlayerStatus {
        self.state.status()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.state
            .current_track_index
            .and_then(|i| self.tracks.get(i))
    }

    pub fn media_root(&self) -> Option<&Path> {
        self.media_root.as_deref()
    }

    pub fn position(&self) -> Duration {
        self.media.position()
    }

    pub fn duration(&self) -> Option<Duration> {
        self.media.duration()
    }

    #[cfg(test)]
    pub(crate) fn media(&self) -> &M {
        &self.media
    }

    #[cfg(test)]
    pub(crate) fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// Select `index`, load its resource and start playback.
    ///
    /// A resource that cannot be loaded or started is logged and leaves the
    /// transport paused on that index.
    pub fn play(&mut self, index: usize) {
        let Some(track) = self.tracks.get(index) else {
            log::debug!("play({index}) ignored: list has {} tracks", self.tracks.len());
            return;
        };
        let path = track.resource(self.media_root.as_deref());
        let hint = track.duration;
        let label = track.display();

        self.state.current_track_index = Some(index);
        self.state.position_fraction = 0.0;
        self.state.is_playing = false;

        match self.media.load(&path, hint).and_then(|()| self.media.play()) {
            Ok(()) => {
                self.state.is_playing = true;
                log::info!("playing {label}");
            }
            Err(e) => log::warn!("cannot play {label}: {e}"),
        }
    }

    pub fn pause(&mut self) {
        self.media.pause();
        self.state.is_playing = false;
    }

    /// Play/pause. With nothing selected, starts the first track.
    pub fn toggle(&mut self) {
        match self.state.current_track_index {
            None => {
                if !self.tracks.is_empty() {
                    self.play(0);
                }
            }
            Some(_) if self.state.is_playing => self.pause(),
            Some(index) => self.resume(index),
        }
    }

    fn resume(&mut self, index: usize) {
        if !self.media.is_loaded() {
            self.play(index);
            return;
        }
        match self.media.play() {
            Ok(()) => self.state.is_playing = true,
            Err(e) => {
                log::warn!("cannot resume playback: {e}");
                self.state.is_playing = false;
            }
        }
    }

    /// Advance to the next track, or to a random one when shuffling. The
    /// random pick may land on the current track again.
    pub fn next(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        let index = if self.state.shuffle {
            self.rng.random_range(0..len)
        } else {
            self.state.current_track_index.map_or(0, |i| (i + 1) % len)
        };
        self.play(index);
    }

    /// Restart the current track when past the restart threshold, otherwise
    /// step back one track (wrapping to the end).
    pub fn previous(&mut self) {
        let len = self.tracks.len();
        if len == 0 {
            return;
        }
        if self.state.current_track_index.is_some()
            && self.state.position_fraction > self.restart_threshold
        {
            self.seek(0.0);
            return;
        }
        let index = match self.state.current_track_index {
            None | Some(0) => len - 1,
            Some(i) => i - 1,
        };
        self.play(index);
    }

    /// Jump to `fraction` of the loaded track. No-op while the duration is
    /// unknown.
    pub fn seek(&mut self, fraction: f64) {
        if fraction.is_nan() || !self.media.is_loaded() {
            return;
        }
        let fraction = fraction.clamp(0.0, 1.0);
        let Some(total) = known_duration(self.media.duration()) else {
            log::debug!("seek ignored: duration unknown");
            return;
        };
        self.media.set_position(total.mul_f64(fraction));
        self.state.position_fraction = fraction;
        log::debug!("seek to {:.0}%", fraction * 100.0);
    }

    /// Seek relative to the last polled position.
    pub fn seek_by(&mut self, delta: f64) {
        self.seek((self.state.position_fraction + delta).clamp(0.0, 1.0));
    }

    /// Set the volume. Zero mutes; anything above zero unmutes.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = sanitize_volume(volume);
        self.state.volume = volume;
        self.state.muted = volume == 0.0;
        self.media.set_volume(volume);
        self.media.set_muted(self.state.muted);
    }

    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        self.media.set_muted(self.state.muted);
    }

    pub fn toggle_shuffle(&mut self) {
        self.state.shuffle = !self.state.shuffle;
    }

    pub fn toggle_repeat(&mut self) {
        self.state.repeat = !self.state.repeat;
    }

    /// The loaded track played to its end.
    pub fn on_ended(&mut self) {
        if !self.state.repeat {
            self.next();
            return;
        }
        self.seek(0.0);
        self.state.position_fraction = 0.0;
        match self.media.play() {
            Ok(()) => self.state.is_playing = true,
            Err(e) => {
                log::warn!("cannot repeat track: {e}");
                self.state.is_playing = false;
            }
        }
    }

    /// One progress poll: deliver a pending "ended" event, then refresh
    /// `position_fraction`. An unknown or zero duration leaves the fraction
    /// untouched.
    pub fn tick(&mut self) {
        if self.media.take_ended() {
            self.on_ended();
        }
        if !self.media.is_loaded() {
            return;
        }
        let Some(total) = known_duration(self.media.duration()) else {
            return;
        };
        let fraction = self.media.position().as_secs_f64() / total.as_secs_f64();
        self.state.position_fraction = fraction.clamp(0.0, 1.0);
    }

    /// Stop playback, release the media source and clear the selection.
    pub fn stop(&mut self) {
        self.media.pause();
        self.media.unload();
        self.state.current_track_index = None;
        self.state.is_playing = false;
        self.state.position_fraction = 0.0;
    }

    /// Replace the active list. The current track is followed by id; if it is
    /// no longer present, playback stops.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        let current_id = self.current_track().map(|t| t.id);
        self.tracks = tracks;

        if let Some(id) = current_id {
            match self.tracks.iter().position(|t| t.id == id) {
                Some(i) => self.state.current_track_index = Some(i),
                None => {
                    log::info!("track {id} left the active list, stopping");
                    self.stop();
                }
            }
        }
    }

    /// Remove the track with `id` from the active list. Removing the playing
    /// track stops playback first.
    pub fn remove_track(&mut self, id: u64) -> Option<Track> {
        let pos = self.tracks.iter().position(|t| t.id == id)?;
        match self.state.current_track_index {
            Some(i) if i == pos => self.stop(),
            Some(i) if i > pos => self.state.current_track_index = Some(i - 1),
            _ => {}
        }
        Some(self.tracks.remove(pos))
    }

    pub fn set_shuffle(&mut self, on: bool) {
        self.state.shuffle = on;
    }

    pub fn set_repeat(&mut self, on: bool) {
        self.state.repeat = on;
    }
}

impl<M: Media> Drop for Transport<M> {
    fn drop(&mut self) {
        self.media.unload();
    }
}

fn sanitize_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

fn known_duration(d: Option<Duration>) -> Option<Duration> {
    d.filter(|d| !d.is_zero())
}
