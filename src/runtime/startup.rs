use std::path::{Path, PathBuf};

use crate::app::App;
use crate::config::{self, LibrarySource};
use crate::favorites::Favorites;
use crate::library::{self, CatalogError, Track, ViewQuery};
use crate::transport::{RodioMedia, Transport};

/// Where the track list came from, and how relative file paths resolve.
pub struct LibraryInput {
    pub tracks: Vec<Track>,
    pub media_root: Option<PathBuf>,
    pub label: String,
}

/// Build the library from the command-line target or the configured source.
///
/// A file argument is read as a catalog, a directory argument is scanned.
/// Without an argument the `library.source` setting decides, and a scan
/// falls back to the working directory.
pub fn load_library(
    arg: Option<PathBuf>,
    settings: &config::LibrarySettings,
) -> Result<LibraryInput, CatalogError> {
    let catalog = match &arg {
        Some(p) if p.is_file() => Some(p.clone()),
        Some(_) => None,
        None => match settings.source {
            LibrarySource::Catalog => settings.catalog_path.clone(),
            LibrarySource::Scan => None,
        },
    };

    if let Some(path) = catalog {
        let tracks = library::load_catalog(&path)?;
        let media_root = settings
            .media_root
            .clone()
            .or_else(|| path.parent().map(Path::to_path_buf));
        return Ok(LibraryInput {
            tracks,
            media_root,
            label: format!("catalog {}", path.display()),
        });
    }

    let dir = arg
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let tracks = library::scan(&dir, settings);
    Ok(LibraryInput {
        tracks,
        media_root: None,
        label: dir.display().to_string(),
    })
}

fn favorites() -> Favorites {
    match config::default_data_dir() {
        Some(dir) => Favorites::load_or_default(&dir.join("favorites.json")),
        None => {
            log::warn!("no data directory; favorites will not be saved");
            Favorites::in_memory()
        }
    }
}

/// Assemble the app: transport with the configured defaults, favorites and
/// the initial view.
pub fn build_app(input: LibraryInput, settings: &config::Settings) -> App<RodioMedia> {
    let mut transport = Transport::new(RodioMedia::new(), settings.audio.initial_volume)
        .with_media_root(input.media_root)
        .with_restart_threshold(settings.controls.restart_threshold);
    transport.set_shuffle(settings.playback.shuffle);
    transport.set_repeat(settings.playback.repeat);

    let query = ViewQuery {
        sort: settings.library.sort,
        ..ViewQuery::default()
    };

    let mut app = App::new(
        input.tracks,
        favorites(),
        query,
        transport,
        settings.controls.clone(),
    );
    app.source_label = Some(input.label);
    app
}
