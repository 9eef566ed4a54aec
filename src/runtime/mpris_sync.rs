use crate::app::App;
use crate::mpris::MprisHandle;
use crate::transport::{Media, PlayerStatus};

/// What MPRIS last saw, so snapshots are only pushed on change.
#[derive(Debug, Default, PartialEq)]
pub struct MprisSnapshot {
    track_id: Option<u64>,
    status: PlayerStatus,
    volume: f32,
    muted: bool,
}

impl MprisSnapshot {
    fn of<M: Media>(app: &App<M>) -> Self {
        let state = app.transport.state();
        Self {
            track_id: app.transport.current_track().map(|t| t.id),
            status: app.transport.status(),
            volume: state.volume,
            muted: state.muted,
        }
    }
}

/// Push status, volume and now-playing metadata when any of them changed.
pub fn update_mpris<M: Media>(mpris: &MprisHandle, app: &App<M>, last: &mut Option<MprisSnapshot>) {
    let now = MprisSnapshot::of(app);
    if last.as_ref() == Some(&now) {
        return;
    }

    mpris.set_status(now.status);
    mpris.set_volume(now.volume, now.muted);
    mpris.set_track_metadata(app.transport.current_track(), app.transport.media_root());
    *last = Some(now);
}
