//! Favorite tracks, persisted as a JSON array of track ids.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum FavoritesError {
    #[error("favorites I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed favorites file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Set of favorite track ids, saved after every change when backed by a file.
#[derive(Debug, Default)]
pub struct Favorites {
    ids: HashSet<u64>,
    path: Option<PathBuf>,
}

impl Favorites {
    /// In-memory only; nothing is written.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file is an empty set.
    pub fn load(path: &Path) -> Result<Self, FavoritesError> {
        let ids = match fs::read_to_string(path) {
            Ok(json) => {
                let list: Vec<u64> =
                    serde_json::from_str(&json).map_err(|source| FavoritesError::Json {
                        path: path.to_path_buf(),
                        source,
                    })?;
                list.into_iter().collect()
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashSet::new(),
            Err(source) => {
                return Err(FavoritesError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Ok(Self {
            ids,
            path: Some(path.to_path_buf()),
        })
    }

    /// Load from `path`. A file that exists but cannot be read or parsed is
    /// left untouched: favorites for this session stay in memory only.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(f) => f,
            Err(e) => {
                log::warn!("{e}; favorites will not be saved this session");
                Self::in_memory()
            }
        }
    }

    pub fn contains(&self, id: u64) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &HashSet<u64> {
        &self.ids
    }

    /// Flip `id` in or out of the set. Returns whether it is now a favorite.
    pub fn toggle(&mut self, id: u64) -> bool {
        let now = if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        };
        self.persist();
        now
    }

    /// Drop `id` (a deleted track). No write when it was not a favorite.
    pub fn remove(&mut self, id: u64) {
        if self.ids.remove(&id) {
            self.persist();
        }
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::warn!("{e}");
        }
    }

    fn save(&self) -> Result<(), FavoritesError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let io_err = |source| FavoritesError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut list: Vec<u64> = self.ids.iter().copied().collect();
        list.sort_unstable();
        let json = serde_json::to_string(&list).map_err(|source| FavoritesError::Json {
            path: path.clone(),
            source,
        })?;
        fs::write(path, json).map_err(io_err)
    }
}
