use std::cmp::Ordering;
use std::collections::HashSet;

use crate::config::SortKey;

use super::model::Track;

/// What the user asked to see.
#[derive(Debug, Clone, Default)]
pub struct ViewQuery {
    pub search: String,
    pub favorites_only: bool,
    pub sort: SortKey,
}

fn matches_search(track: &Track, needle_lower: &str) -> bool {
    track.title.to_lowercase().contains(needle_lower)
        || track.artist.to_lowercase().contains(needle_lower)
        || track.genre.to_lowercase().contains(needle_lower)
}

fn compare(a: &Track, b: &Track, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Catalog => Ordering::Equal,
        SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        SortKey::Artist => a
            .artist
            .to_lowercase()
            .cmp(&b.artist.to_lowercase())
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        SortKey::MostLiked => b.likes_count.cmp(&a.likes_count),
    }
}

/// Filter and order `tracks`, returning indices into `tracks`.
///
/// The search is a trimmed, case-insensitive substring match on title,
/// artist or genre. The sort is stable, so ties keep library order.
pub fn view(tracks: &[Track], query: &ViewQuery, favorites: &HashSet<u64>) -> Vec<usize> {
    let needle = query.search.trim().to_lowercase();

    let mut indices: Vec<usize> = tracks
        .iter()
        .enumerate()
        .filter(|(_, t)| !query.favorites_only || favorites.contains(&t.id))
        .filter(|(_, t)| needle.is_empty() || matches_search(t, &needle))
        .map(|(i, _)| i)
        .collect();

    indices.sort_by(|&a, &b| compare(&tracks[a], &tracks[b], query.sort));
    indices
}
