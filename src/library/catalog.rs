//! Loader for the MelodicStream backend's music list.
//!
//! The catalog is the JSON array served by `GET /api/music`, saved to disk:
//! `[{ "id": 1, "title": "...", "artist": "...", "genre": "...",
//! "filePath": "uploads/x.mp3", "likesCount": 3 }, ...]`. Unknown fields are
//! ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::model::Track;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed catalog {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry {
    id: u64,
    title: String,
    artist: String,
    #[serde(default)]
    genre: Option<String>,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    likes_count: u64,
}

/// Parse catalog JSON. Entries without a `filePath` cannot be played and are
/// dropped.
pub fn parse_catalog(json: &str) -> Result<Vec<Track>, serde_json::Error> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .filter_map(|e| {
            let Some(file_path) = e.file_path.filter(|p| !p.trim().is_empty()) else {
                log::warn!("catalog entry {} ({}) has no filePath, skipping", e.id, e.title);
                return None;
            };
            Some(Track {
                id: e.id,
                title: e.title,
                artist: e.artist,
                genre: e.genre.unwrap_or_default(),
                file_path: PathBuf::from(file_path),
                likes_count: e.likes_count,
                duration: None,
            })
        })
        .collect())
}

/// Read and parse the catalog at `path`.
pub fn load_catalog(path: &Path) -> Result<Vec<Track>, CatalogError> {
    let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let tracks = parse_catalog(&json).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("loaded {} tracks from catalog {}", tracks.len(), path.display());
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"id": 4, "title": "Blue in Green", "artist": "Miles Davis", "genre": "Jazz",
         "filePath": "uploads/blue.mp3", "likesCount": 12, "approved": true, "comments": []},
        {"id": 9, "title": "Untitled", "artist": "Nobody", "genre": null, "filePath": null},
        {"id": 11, "title": "Teardrop", "artist": "Massive Attack",
         "filePath": "/abs/teardrop.flac"}
    ]"#;

    #[test]
    fn parse_catalog_maps_fields_and_skips_unplayable_entries() {
        let tracks = parse_catalog(SAMPLE).unwrap();
        assert_eq!(tracks.len(), 2);

        assert_eq!(tracks[0].id, 4);
        assert_eq!(tracks[0].genre, "Jazz");
        assert_eq!(tracks[0].likes_count, 12);
        assert_eq!(tracks[0].file_path, PathBuf::from("uploads/blue.mp3"));

        assert_eq!(tracks[1].id, 11);
        assert_eq!(tracks[1].genre, "");
        assert_eq!(tracks[1].likes_count, 0);
    }

    #[test]
    fn load_catalog_reports_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("nope.json");
        assert!(matches!(load_catalog(&missing), Err(CatalogError::Io { .. })));

        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{ not json").unwrap();
        assert!(matches!(load_catalog(&bad), Err(CatalogError::Json { .. })));

        let good = dir.path().join("catalog.json");
        std::fs::write(&good, SAMPLE).unwrap();
        assert_eq!(load_catalog(&good).unwrap().len(), 2);
    }

    #[test]
    fn relative_paths_resolve_against_media_root() {
        let tracks = parse_catalog(SAMPLE).unwrap();
        let root = Path::new("/srv/music");
        assert_eq!(
            tracks[0].resource(Some(root)),
            PathBuf::from("/srv/music/uploads/blue.mp3")
        );
        assert_eq!(tracks[1].resource(Some(root)), PathBuf::from("/abs/teardrop.flac"));
        assert_eq!(tracks[0].resource(None), PathBuf::from("uploads/blue.mp3"));
    }
}
