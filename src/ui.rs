//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use std::time::Duration;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::config::UiSettings;
use crate::library::Track;
use crate::transport::{Media, PlayerStatus};

const CONTROLS: &[(&str, &str)] = &[
    ("space", "play/pause"),
    ("←/→", "seek ∓5%"),
    ("n/p", "next/prev"),
    ("enter", "play selected"),
    ("j/k", "move"),
    ("/", "search"),
    ("o", "sort"),
    ("*", "favorite"),
    ("v", "favorites only"),
    ("s", "shuffle"),
    ("r", "repeat"),
    ("m", "mute"),
    ("+/-", "volume"),
    ("d", "remove"),
    ("f", "fullscreen"),
    ("q", "quit"),
];

fn controls_text() -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| format!("[{k}] {v}"))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a duration as `M:SS`.
fn format_mss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

fn status_text<M: Media>(app: &App<M>) -> String {
    let state = app.transport.state();
    let mut parts: Vec<String> = Vec::new();

    parts.push(
        match app.transport.status() {
            PlayerStatus::Idle => "Idle",
            PlayerStatus::Playing => "Playing",
            PlayerStatus::Paused => "Paused",
        }
        .to_string(),
    );
    parts.push(format!("Shuffle: {}", if state.shuffle { "ON" } else { "OFF" }));
    parts.push(format!("Repeat: {}", if state.repeat { "ON" } else { "OFF" }));
    if state.muted {
        parts.push("Volume: muted".to_string());
    } else {
        parts.push(format!("Volume: {:.0}%", state.volume * 100.0));
    }
    parts.push(format!("Sort: {}", app.query.sort.label()));
    if app.query.favorites_only {
        parts.push("Favorites only".to_string());
    }
    parts.push(format!("{}/{} tracks", app.tracks().len(), app.library_len()));
    if let Some(src) = &app.source_label {
        parts.push(src.clone());
    }

    parts.join(" • ")
}

fn track_line<'a, M: Media>(app: &App<M>, track: &'a Track, playing: bool, ui: &UiSettings) -> Line<'a> {
    let mut spans = vec![
        Span::raw(if playing { "♪ " } else { "  " }),
        Span::raw(if app.is_favorite(track.id) { "★ " } else { "  " }),
        Span::raw(track.title.as_str()).bold(),
    ];
    if !track.artist.trim().is_empty() {
        spans.push(Span::raw(" • "));
        spans.push(Span::raw(track.artist.as_str()));
    }
    if ui.show_genre && !track.genre.trim().is_empty() {
        spans.push(Span::raw(format!("  [{}]", track.genre)).italic());
    }
    if ui.show_likes {
        spans.push(Span::raw(format!("  ♥ {}", track.likes_count)));
    }
    if let Some(d) = track.duration {
        spans.push(Span::raw(format!("  {}", format_mss(d))));
    }
    Line::from(spans)
}

fn draw_list<M: Media>(frame: &mut Frame, area: Rect, app: &App<M>, ui: &UiSettings) {
    let tracks = app.tracks();
    let playing_index = app.transport.state().current_track_index;

    // Center the selected item when possible; only build the visible window.
    let total = tracks.len();
    let list_height = area.height.saturating_sub(2) as usize;
    let sel = app.selected.min(total.saturating_sub(1));
    let (start, end) = if total <= list_height || list_height == 0 {
        (0, total)
    } else {
        let half = list_height / 2;
        let mut start = sel.saturating_sub(half);
        if start + list_height > total {
            start = total - list_height;
        }
        (start, start + list_height)
    };

    let items: Vec<ListItem> = tracks[start..end]
        .iter()
        .enumerate()
        .map(|(offset, t)| {
            ListItem::new(track_line(app, t, playing_index == Some(start + offset), ui))
        })
        .collect();

    let title = if total == 0 {
        " tracks (none match) ".to_string()
    } else {
        " tracks ".to_string()
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(sel - start));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn now_playing_label<M: Media>(app: &App<M>) -> String {
    match app.transport.current_track() {
        Some(t) => t.display(),
        None => "Nothing playing".to_string(),
    }
}

fn time_label<M: Media>(app: &App<M>) -> String {
    match app.transport.duration() {
        Some(total) => format!(
            "{} / {}",
            format_mss(app.transport.position()),
            format_mss(total)
        ),
        None => format_mss(app.transport.position()),
    }
}

fn draw_player<M: Media>(frame: &mut Frame, area: Rect, app: &App<M>) {
    let block = padded_block(" now playing ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let title = Paragraph::new(now_playing_label(app)).bold();
    frame.render_widget(title, rows[0]);

    let ratio = app.transport.state().position_fraction.clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .ratio(ratio)
        .label(time_label(app))
        .use_unicode(true);
    frame.render_widget(gauge, rows[1]);
}

fn draw_fullscreen<M: Media>(frame: &mut Frame, area: Rect, app: &App<M>) {
    let block = padded_block(" now playing (f to exit) ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let details = match app.transport.current_track() {
        Some(t) => format!(
            "{}\n\n{}\n{}\n♥ {}{}",
            t.title,
            t.artist,
            t.genre,
            t.likes_count,
            if app.is_favorite(t.id) { "  ★" } else { "" }
        ),
        None => "Nothing playing".to_string(),
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(
        Paragraph::new(details)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(status_text(app)).alignment(Alignment::Center),
        rows[1],
    );
    frame.render_widget(
        Gauge::default()
            .ratio(app.transport.state().position_fraction.clamp(0.0, 1.0))
            .label(time_label(app))
            .use_unicode(true),
        rows[2],
    );
}

/// Render the entire UI into the provided `frame`.
pub fn draw<M: Media>(frame: &mut Frame, app: &App<M>, ui: &UiSettings) {
    let show_search = app.search_mode || !app.query.search.is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" melodicstream ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let footer = Paragraph::new(controls_text())
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);

    if app.fullscreen {
        draw_fullscreen(frame, chunks[1], app);
        return;
    }

    let mut constraints = vec![Constraint::Length(3)];
    if show_search {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Min(1));
    constraints.push(Constraint::Length(4));
    let body = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[1]);

    let status = Paragraph::new(status_text(app))
        .block(padded_block(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, body[0]);

    let mut next = 1;
    if show_search {
        let cursor = if app.search_mode { "_" } else { "" };
        let search = Paragraph::new(format!("{}{}", app.query.search, cursor))
            .block(padded_block(" search (title, artist, genre) "));
        frame.render_widget(search, body[next]);
        next += 1;
    }

    draw_list(frame, body[next], app, ui);
    draw_player(frame, body[next + 1], app);
}
