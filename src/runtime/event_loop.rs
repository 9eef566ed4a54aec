use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Action, App, action_for};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::{MprisSnapshot, update_mpris};
use crate::transport::{Media, PlayerStatus};
use crate::ui;

/// Main terminal event loop: draws the UI, applies keys and remote commands,
/// and polls playback progress every `audio.tick_ms`. Returns when quit is
/// requested.
pub fn run<M: Media>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<M>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick = Duration::from_millis(settings.audio.tick_ms);
    let mut last_tick = Instant::now();
    let mut last_mpris: Option<MprisSnapshot> = None;

    loop {
        update_mpris(mpris, app, &mut last_mpris);
        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app) {
                return Ok(());
            }
        }

        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = action_for(key, app.search_mode) {
                        if app.apply(action) {
                            log::info!("quit requested");
                            return Ok(());
                        }
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick {
            app.tick();
            last_tick = Instant::now();
        }
    }
}

/// Map a remote command onto the app. Returns `true` on quit.
fn handle_control_cmd<M: Media>(cmd: ControlCmd, app: &mut App<M>) -> bool {
    log::debug!("MPRIS command: {cmd:?}");
    match cmd {
        ControlCmd::Quit => return app.apply(Action::Quit),
        ControlCmd::PlayPause => {
            app.apply(Action::TogglePlay);
        }
        ControlCmd::Play => {
            if app.transport.status() != PlayerStatus::Playing {
                app.apply(Action::TogglePlay);
            }
        }
        ControlCmd::Pause => app.transport.pause(),
        ControlCmd::Stop => app.transport.stop(),
        ControlCmd::Next => {
            app.apply(Action::Next);
        }
        ControlCmd::Prev => {
            app.apply(Action::Previous);
        }
    }
    false
}
