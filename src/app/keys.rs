use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::model::Action;

/// Map a key press to an [`Action`]. While the search line has focus,
/// printable keys go to the query.
pub fn action_for(key: KeyEvent, search_mode: bool) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::SelectNext),
            KeyCode::Char('p') => Some(Action::SelectPrev),
            _ => None,
        };
    }

    if search_mode {
        return match key.code {
            KeyCode::Esc => Some(Action::SearchCancel),
            KeyCode::Enter => Some(Action::SearchAccept),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Up => Some(Action::SelectPrev),
            KeyCode::Char(c) if !c.is_control() => Some(Action::SearchInput(c)),
            _ => None,
        };
    }

    let action = match key.code {
        KeyCode::Char(' ') => Action::TogglePlay,
        KeyCode::Right => Action::SeekForward,
        KeyCode::Left => Action::SeekBackward,
        KeyCode::Char('f') => Action::ToggleFullscreen,
        KeyCode::Char('m') => Action::ToggleMute,
        KeyCode::Char('n') => Action::Next,
        KeyCode::Char('p') => Action::Previous,
        KeyCode::Char('s') => Action::ToggleShuffle,
        KeyCode::Char('r') => Action::ToggleRepeat,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::VolumeUp,
        KeyCode::Char('-') => Action::VolumeDown,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,
        KeyCode::Char('g') | KeyCode::Home => Action::SelectFirst,
        KeyCode::Char('G') | KeyCode::End => Action::SelectLast,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('o') => Action::CycleSort,
        KeyCode::Char('*') => Action::ToggleFavorite,
        KeyCode::Char('v') => Action::ToggleFavoritesOnly,
        KeyCode::Char('d') | KeyCode::Delete => Action::DeleteSelected,
        KeyCode::Char('q') => Action::Quit,
        _ => return None,
    };
    Some(action)
}
