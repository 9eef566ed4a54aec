use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();

    // The TUI owns the terminal, so logging goes to a file from the start.
    match logging::setup_logging(&settings.log) {
        Ok(path) => log::info!("melodicstream starting, logging to {}", path.display()),
        Err(e) => eprintln!("melodicstream: logging disabled: {e}"),
    }
    if let Some(msg) = config_warning {
        log::warn!("{msg}");
    }

    let arg = env::args().nth(1).map(PathBuf::from);
    let input = startup::load_library(arg, &settings.library)?;
    let mut app = startup::build_app(input, &settings);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app, &mpris, &control_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Releases the output stream and the loaded source.
    drop(app);
    log::info!("melodicstream exiting");

    run_result
}
