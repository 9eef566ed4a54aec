//! Application model: `App` and the `Action`s it understands.
//!
//! `App` owns the full library, the favorites, the view parameters and the
//! transport. The transport only ever sees the active (filtered, sorted) list;
//! `refresh_view` is the single place that list is rebuilt.

use crate::config::ControlsSettings;
use crate::favorites::Favorites;
use crate::library::{Track, ViewQuery, view};
use crate::transport::{Media, Transport};

/// Everything a key press or remote command can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    TogglePlay,
    SeekForward,
    SeekBackward,
    ToggleFullscreen,
    ToggleMute,
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
    VolumeUp,
    VolumeDown,
    SelectNext,
    SelectPrev,
    SelectFirst,
    SelectLast,
    PlaySelected,
    StartSearch,
    SearchInput(char),
    SearchBackspace,
    SearchAccept,
    SearchCancel,
    CycleSort,
    ToggleFavorite,
    ToggleFavoritesOnly,
    DeleteSelected,
    Quit,
}

pub struct App<M: Media> {
    library: Vec<Track>,
    pub favorites: Favorites,
    pub query: ViewQuery,
    pub transport: Transport<M>,
    controls: ControlsSettings,

    /// Cursor position in the active list.
    pub selected: usize,
    /// Cursor jumps to the playing track whenever it changes.
    pub follow_playback: bool,
    pub search_mode: bool,
    pub fullscreen: bool,
    /// Where the library came from, for the status line.
    pub source_label: Option<String>,
}

impl<M: Media> App<M> {
    pub fn new(
        library: Vec<Track>,
        favorites: Favorites,
        query: ViewQuery,
        transport: Transport<M>,
        controls: ControlsSettings,
    ) -> Self {
        let mut app = Self {
            library,
            favorites,
            query,
            transport,
            controls,
            selected: 0,
            follow_playback: true,
            search_mode: false,
            fullscreen: false,
            source_label: None,
        };
        app.refresh_view();
        app
    }

    /// The active list, in display order.
    pub fn tracks(&self) -> &[Track] {
        self.transport.tracks()
    }

    pub fn library_len(&self) -> usize {
        self.library.len()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.tracks().get(self.selected)
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.contains(id)
    }

    /// Recompute the active list from the library and hand it to the transport.
    pub fn refresh_view(&mut self) {
        let selected_id = self.selected_track().map(|t| t.id);

        let active: Vec<Track> = view(&self.library, &self.query, self.favorites.ids())
            .into_iter()
            .map(|i| self.library[i].clone())
            .collect();
        self.transport.set_tracks(active);

        let len = self.tracks().len();
        self.selected = selected_id
            .and_then(|id| self.tracks().iter().position(|t| t.id == id))
            .unwrap_or(0)
            .min(len.saturating_sub(1));
        self.sync_selection();
    }

    /// Move the cursor onto the playing track when following playback.
    pub fn sync_selection(&mut self) {
        if !self.follow_playback {
            return;
        }
        if let Some(i) = self.transport.state().current_track_index {
            self.selected = i;
        }
    }

    fn select_next(&mut self) {
        let len = self.tracks().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn select_prev(&mut self) {
        let len = self.tracks().len();
        if len > 0 {
            self.selected = if self.selected == 0 { len - 1 } else { self.selected - 1 };
        }
    }

    fn delete_selected(&mut self) {
        let Some(id) = self.selected_track().map(|t| t.id) else {
            return;
        };
        // Stops playback first when the deleted track is the one playing.
        if let Some(track) = self.transport.remove_track(id) {
            log::info!("removed {} from the session", track.display());
        }
        self.library.retain(|t| t.id != id);
        self.favorites.remove(id);
        self.refresh_view();
    }

    /// Apply `action`. Returns `true` when the app should quit.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,

            Action::TogglePlay => {
                self.follow_playback = true;
                self.transport.toggle();
            }
            Action::SeekForward => self.transport.seek_by(self.controls.seek_step),
            Action::SeekBackward => self.transport.seek_by(-self.controls.seek_step),
            Action::ToggleFullscreen => self.fullscreen = !self.fullscreen,
            Action::ToggleMute => self.transport.toggle_mute(),
            Action::Next => {
                self.follow_playback = true;
                self.transport.next();
            }
            Action::Previous => {
                self.follow_playback = true;
                self.transport.previous();
            }
            Action::ToggleShuffle => self.transport.toggle_shuffle(),
            Action::ToggleRepeat => self.transport.toggle_repeat(),
            Action::VolumeUp => {
                let v = self.transport.state().volume + self.controls.volume_step;
                self.transport.set_volume(v);
            }
            Action::VolumeDown => {
                let v = self.transport.state().volume - self.controls.volume_step;
                self.transport.set_volume(v);
            }

            Action::SelectNext => {
                self.follow_playback = false;
                self.select_next();
            }
            Action::SelectPrev => {
                self.follow_playback = false;
                self.select_prev();
            }
            Action::SelectFirst => {
                self.follow_playback = false;
                self.selected = 0;
            }
            Action::SelectLast => {
                self.follow_playback = false;
                self.selected = self.tracks().len().saturating_sub(1);
            }
            Action::PlaySelected => {
                self.follow_playback = true;
                self.transport.play(self.selected);
            }

            Action::StartSearch => {
                self.search_mode = true;
                self.follow_playback = false;
            }
            Action::SearchInput(c) => {
                self.query.search.push(c);
                self.refresh_view();
            }
            Action::SearchBackspace => {
                self.query.search.pop();
                self.refresh_view();
            }
            Action::SearchAccept => self.search_mode = false,
            Action::SearchCancel => {
                self.search_mode = false;
                self.query.search.clear();
                self.refresh_view();
            }

            Action::CycleSort => {
                self.query.sort = self.query.sort.cycle();
                self.refresh_view();
            }
            Action::ToggleFavorite => {
                if let Some(id) = self.selected_track().map(|t| t.id) {
                    self.favorites.toggle(id);
                    if self.query.favorites_only {
                        self.refresh_view();
                    }
                }
            }
            Action::ToggleFavoritesOnly => {
                self.query.favorites_only = !self.query.favorites_only;
                self.refresh_view();
            }
            Action::DeleteSelected => self.delete_selected(),
        }

        self.sync_selection();
        false
    }

    /// One progress poll of the transport.
    pub fn tick(&mut self) {
        self.transport.tick();
        self.sync_selection();
    }
}
