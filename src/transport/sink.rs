//! `rodio`-backed [`Media`] implementation.
//!
//! One `Sink` holds the loaded file. Seeking tries `Sink::try_seek` and, for
//! formats that cannot seek, rebuilds the sink with `Source::skip_duration`.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::source::SkipDuration;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};

use super::media::{Media, MediaError};

type FileSource = SkipDuration<Decoder<BufReader<File>>>;

/// Decode `path` starting at `start_at`. Also returns the length reported
/// by the decoder, if any.
///
/// `Decoder::try_from(File)` passes the byte length and marks the stream
/// seekable; without both, MP3 and Vorbis report no length and cannot seek
/// backwards.
fn open_at(path: &Path, start_at: Duration) -> Result<(FileSource, Option<Duration>), MediaError> {
    let file = File::open(path).map_err(|source| MediaError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let decoder = Decoder::try_from(file).map_err(|source| MediaError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let total = decoder.total_duration();
    Ok((decoder.skip_duration(start_at), total))
}

/// Where new sinks get connected.
enum Output {
    /// The default device, opened on first use.
    Device(Option<OutputStream>),
    /// No device: each sink's queue is handed to the caller to drain.
    #[cfg(test)]
    Detached(Vec<rodio::queue::SourcesQueueOutput>),
}

impl Default for Output {
    fn default() -> Self {
        Output::Device(None)
    }
}

#[derive(Default)]
pub struct RodioMedia {
    output: Output,
    sink: Option<Sink>,
    path: Option<PathBuf>,
    duration: Option<Duration>,
    /// Where the current sink's source starts in the file. `get_pos` counts
    /// from the start of the source, so a rebuilt sink needs this added.
    offset: Duration,
    volume: f32,
    muted: bool,
    /// Set by `play`, cleared once the drained sink has been reported.
    started: bool,
}

impl RodioMedia {
    pub fn new() -> Self {
        Self {
            output: Output::default(),
            sink: None,
            path: None,
            duration: None,
            offset: Duration::ZERO,
            volume: 1.0,
            muted: false,
            started: false,
        }
    }

    /// Open the default output on first use so a missing device surfaces as
    /// a playback failure rather than a startup crash.
    fn connect(&mut self) -> Result<Sink, MediaError> {
        match &mut self.output {
            Output::Device(stream) => {
                if stream.is_none() {
                    let mut opened =
                        OutputStreamBuilder::open_default_stream().map_err(MediaError::NoOutput)?;
                    // rodio prints to stderr when the stream is dropped, which would
                    // land on top of the TUI.
                    opened.log_on_drop(false);
                    *stream = Some(opened);
                }
                let stream = stream.as_ref().ok_or(MediaError::NotLoaded)?;
                Ok(Sink::connect_new(stream.mixer()))
            }
            #[cfg(test)]
            Output::Detached(queues) => {
                let (sink, queue) = Sink::new();
                queues.push(queue);
                Ok(sink)
            }
        }
    }

    /// A paused sink for `path`, positioned at `start_at`.
    fn sink_at(&mut self, path: &Path, start_at: Duration) -> Result<(Sink, Option<Duration>), MediaError> {
        let (source, total) = open_at(path, start_at)?;
        let sink = self.connect()?;
        sink.append(source);
        sink.pause();
        sink.set_volume(self.effective_volume());
        Ok((sink, total))
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Replace the current sink with a fresh one positioned at `start_at`,
    /// keeping the paused/playing state.
    fn rebuild_at(&mut self, start_at: Duration) -> Result<(), MediaError> {
        let path = self.path.clone().ok_or(MediaError::NotLoaded)?;
        let was_paused = self.sink.as_ref().is_none_or(|s| s.is_paused());

        let (sink, _) = self.sink_at(&path, start_at)?;
        if !was_paused {
            sink.play();
        }
        if let Some(old) = self.sink.replace(sink) {
            old.stop();
        }
        self.offset = start_at;
        Ok(())
    }
}

impl Media for RodioMedia {
    fn load(&mut self, path: &Path, duration_hint: Option<Duration>) -> Result<(), MediaError> {
        self.unload();

        let (sink, total) = self.sink_at(path, Duration::ZERO)?;
        self.sink = Some(sink);
        self.path = Some(path.to_path_buf());
        self.duration = total.or(duration_hint);
        Ok(())
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let drained = self.sink.as_ref().ok_or(MediaError::NotLoaded)?.empty();
        if drained {
            // Played to the end: start over, as a media element does.
            self.rebuild_at(Duration::ZERO)?;
        }
        if let Some(sink) = &self.sink {
            sink.play();
        }
        self.started = true;
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn is_loaded(&self) -> bool {
        self.sink.is_some()
    }

    fn position(&self) -> Duration {
        self.sink
            .as_ref()
            .map_or(Duration::ZERO, |s| self.offset + s.get_pos())
    }

    fn set_position(&mut self, position: Duration) {
        let Some(sink) = &self.sink else {
            return;
        };
        if !sink.empty() {
            match sink.try_seek(position) {
                // The seek lands on an absolute file position.
                Ok(()) => {
                    self.offset = Duration::ZERO;
                    return;
                }
                Err(e) => log::debug!("seek unsupported ({e}), rebuilding sink"),
            }
        }
        if let Err(e) = self.rebuild_at(position) {
            log::warn!("seek to {position:?} failed: {e}");
        }
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if let Some(sink) = &self.sink {
            sink.set_volume(self.effective_volume());
        }
    }

    fn take_ended(&mut self) -> bool {
        let ended = self.started
            && self
                .sink
                .as_ref()
                .is_some_and(|s| !s.is_paused() && s.empty());
        if ended {
            self.started = false;
        }
        ended
    }

    fn unload(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.path = None;
        self.duration = None;
        self.offset = Duration::ZERO;
        self.started = false;
    }
}

impl Drop for RodioMedia {
    fn drop(&mut self) {
        self.unload();
    }
}
