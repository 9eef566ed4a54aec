//! Playback transport: play/pause/seek/next/previous over one media primitive.

mod controller;
mod media;
mod sink;
mod types;

pub use controller::Transport;
pub use media::{Media, MediaError};
pub use sink::RodioMedia;
pub use types::{PlaybackState, PlayerStatus};
