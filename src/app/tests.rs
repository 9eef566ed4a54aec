use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::config::{ControlsSettings, SortKey};
use crate::favorites::Favorites;
use crate::library::{Track, ViewQuery};
use crate::transport::tests::{FakeMedia, track};
use crate::transport::{PlayerStatus, Transport};

fn t(id: u64, title: &str, genre: &str, likes: u64) -> Track {
    Track {
        genre: genre.into(),
        likes_count: likes,
        ..track(id, title)
    }
}

fn app() -> App<FakeMedia> {
    let library = vec![
        t(1, "Alpha", "Jazz", 3),
        t(2, "Beta", "Rock", 10),
        t(3, "Gamma", "Jazz", 7),
    ];
    let transport = Transport::new(FakeMedia::default(), 0.7).with_rng(StdRng::seed_from_u64(1));
    App::new(
        library,
        Favorites::in_memory(),
        ViewQuery::default(),
        transport,
        ControlsSettings::default(),
    )
}

fn titles(app: &App<FakeMedia>) -> Vec<&str> {
    app.tracks().iter().map(|t| t.title.as_str()).collect()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn document_shortcuts_map_to_transport_actions() {
    assert_eq!(action_for(key(KeyCode::Char(' ')), false), Some(Action::TogglePlay));
    assert_eq!(action_for(key(KeyCode::Right), false), Some(Action::SeekForward));
    assert_eq!(action_for(key(KeyCode::Left), false), Some(Action::SeekBackward));
    assert_eq!(action_for(key(KeyCode::Char('f')), false), Some(Action::ToggleFullscreen));
    assert_eq!(action_for(key(KeyCode::Char('m')), false), Some(Action::ToggleMute));
    assert_eq!(action_for(key(KeyCode::F(5)), false), None);
}

#[test]
fn search_mode_routes_printable_keys_to_query() {
    assert_eq!(action_for(key(KeyCode::Char('m')), true), Some(Action::SearchInput('m')));
    assert_eq!(action_for(key(KeyCode::Char(' ')), true), Some(Action::SearchInput(' ')));
    assert_eq!(action_for(key(KeyCode::Esc), true), Some(Action::SearchCancel));
    assert_eq!(
        action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), true),
        Some(Action::Quit)
    );
}

#[test]
fn space_starts_first_visible_track() {
    let mut app = app();
    assert!(!app.apply(Action::TogglePlay));
    assert_eq!(app.transport.state().current_track_index, Some(0));
    assert_eq!(app.transport.status(), PlayerStatus::Playing);
    assert_eq!(app.selected, 0);
}

#[test]
fn arrows_seek_by_five_percent() {
    let mut app = app();
    app.apply(Action::TogglePlay);
    app.apply(Action::SeekForward);
    app.apply(Action::SeekForward);
    assert!((app.transport.state().position_fraction - 0.1).abs() < 1e-9);
    app.apply(Action::SeekBackward);
    assert!((app.transport.state().position_fraction - 0.05).abs() < 1e-9);
}

#[test]
fn search_filters_active_list_and_cancel_restores_it() {
    let mut app = app();
    app.apply(Action::StartSearch);
    assert!(app.search_mode);
    for c in "jazz".chars() {
        app.apply(Action::SearchInput(c));
    }
    assert_eq!(titles(&app), vec!["Alpha", "Gamma"]);

    app.apply(Action::SearchCancel);
    assert!(!app.search_mode);
    assert_eq!(titles(&app), vec!["Alpha", "Beta", "Gamma"]);
}

#[test]
fn sorting_keeps_playing_track_selected() {
    let mut app = app();
    app.apply(Action::SelectLast);
    app.apply(Action::PlaySelected);
    assert_eq!(app.transport.current_track().unwrap().title, "Gamma");

    // Catalog -> Title -> Artist -> MostLiked
    for _ in 0..3 {
        app.apply(Action::CycleSort);
    }
    assert_eq!(app.query.sort, SortKey::MostLiked);
    assert_eq!(titles(&app), vec!["Beta", "Gamma", "Alpha"]);
    assert_eq!(app.transport.state().current_track_index, Some(1));
    assert_eq!(app.selected, 1);
    assert!(app.transport.state().is_playing);
}

#[test]
fn filtering_out_playing_track_stops_playback() {
    let mut app = app();
    app.apply(Action::PlaySelected);
    assert_eq!(app.transport.current_track().unwrap().title, "Alpha");

    app.apply(Action::StartSearch);
    for c in "rock".chars() {
        app.apply(Action::SearchInput(c));
    }
    assert_eq!(titles(&app), vec!["Beta"]);
    assert_eq!(app.transport.status(), PlayerStatus::Idle);
}

#[test]
fn favorites_only_view() {
    let mut app = app();
    app.apply(Action::SelectNext);
    app.apply(Action::ToggleFavorite);
    assert!(app.is_favorite(2));

    app.apply(Action::ToggleFavoritesOnly);
    assert_eq!(titles(&app), vec!["Beta"]);

    app.apply(Action::ToggleFavorite);
    assert!(app.tracks().is_empty());
}

#[test]
fn deleting_playing_track_stops_and_clears_index() {
    let mut app = app();
    app.apply(Action::SelectNext);
    app.apply(Action::PlaySelected);
    app.apply(Action::ToggleFavorite);
    assert!(app.transport.state().is_playing);

    app.apply(Action::DeleteSelected);
    assert_eq!(app.transport.state().current_track_index, None);
    assert!(!app.transport.state().is_playing);
    assert_eq!(titles(&app), vec!["Alpha", "Gamma"]);
    assert_eq!(app.library_len(), 2);
    assert!(!app.is_favorite(2));
}

#[test]
fn deleting_another_track_keeps_playback() {
    let mut app = app();
    app.apply(Action::SelectLast);
    app.apply(Action::PlaySelected);

    app.apply(Action::SelectFirst);
    app.apply(Action::DeleteSelected);
    assert_eq!(app.transport.current_track().unwrap().title, "Gamma");
    assert_eq!(app.transport.state().current_track_index, Some(1));
    assert!(app.transport.state().is_playing);
}

#[test]
fn cursor_follows_playback_until_user_moves_it() {
    let mut app = app();
    app.apply(Action::TogglePlay);
    app.apply(Action::Next);
    assert_eq!(app.selected, 1);

    app.apply(Action::SelectPrev);
    assert!(!app.follow_playback);
    app.apply(Action::SelectPrev);
    assert_eq!(app.selected, 2);

    app.transport.media_mut().ended = true;
    app.tick();
    assert_eq!(app.transport.state().current_track_index, Some(2));
    assert_eq!(app.selected, 2);
}

#[test]
fn volume_keys_step_and_clamp() {
    let mut app = app();
    for _ in 0..10 {
        app.apply(Action::VolumeDown);
    }
    assert_eq!(app.transport.state().volume, 0.0);
    assert!(app.transport.state().muted);

    app.apply(Action::VolumeUp);
    assert!(!app.transport.state().muted);
}

#[test]
fn quit_is_reported() {
    let mut app = app();
    assert!(app.apply(Action::Quit));
    assert!(!app.apply(Action::ToggleFullscreen));
    assert!(app.fullscreen);
}
