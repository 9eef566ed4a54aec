use super::load::{default_config_path, default_data_dir, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_explicit_env_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("MELODICSTREAM_CONFIG_PATH", "/tmp/ms-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/ms-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("melodicstream")
            .join("config.toml")
    );
}

#[test]
fn default_data_dir_falls_back_to_home_local_share() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_DATA_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_data_dir().unwrap(),
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".local/share")
            .join("melodicstream")
    );
}

#[test]
fn defaults_match_the_web_player() {
    let s = Settings::default();
    assert_eq!(s.audio.initial_volume, 0.7);
    assert_eq!(s.audio.tick_ms, 100);
    assert_eq!(s.controls.seek_step, 0.05);
    assert_eq!(s.controls.restart_threshold, 0.1);
    assert!(!s.playback.shuffle);
    assert!(!s.playback.repeat);
    assert_eq!(s.library.source, LibrarySource::Scan);
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
initial_volume = 0.5
tick_ms = 250

[controls]
seek_step = 0.1
restart_threshold = 0.2

[playback]
shuffle = true
repeat = true

[ui]
header_text = "hello"
show_likes = false

[library]
source = "catalog"
catalog_path = "/srv/music/catalog.json"
media_root = "/srv/music"
sort = "most_liked"

[log]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MELODICSTREAM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("MELODICSTREAM__AUDIO__TICK_MS");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.initial_volume, 0.5);
    assert_eq!(s.audio.tick_ms, 250);
    assert_eq!(s.controls.seek_step, 0.1);
    assert_eq!(s.controls.restart_threshold, 0.2);
    assert!(s.playback.shuffle);
    assert!(s.playback.repeat);
    assert_eq!(s.ui.header_text, "hello");
    assert!(!s.ui.show_likes);
    assert!(s.ui.show_genre);
    assert_eq!(s.library.source, LibrarySource::Catalog);
    assert_eq!(
        s.library.catalog_path.as_deref(),
        Some(std::path::Path::new("/srv/music/catalog.json"))
    );
    assert_eq!(s.library.sort, SortKey::MostLiked);
    assert_eq!(s.log.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
tick_ms = 250
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("MELODICSTREAM_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("MELODICSTREAM__AUDIO__TICK_MS", "50");

    let s = Settings::load().unwrap();
    assert_eq!(s.audio.tick_ms, 50);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.initial_volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.restart_threshold = -0.1;
    assert!(s.validate().is_err());
}

#[test]
fn validate_requires_catalog_path_for_catalog_source() {
    let mut s = Settings::default();
    s.library.source = LibrarySource::Catalog;
    assert!(s.validate().is_err());

    s.library.catalog_path = Some("/tmp/catalog.json".into());
    assert!(s.validate().is_ok());
}

#[test]
fn sort_key_cycles_through_all_keys() {
    let mut k = SortKey::Catalog;
    let mut seen = vec![k];
    for _ in 0..3 {
        k = k.cycle();
        seen.push(k);
    }
    assert_eq!(
        seen,
        vec![SortKey::Catalog, SortKey::Title, SortKey::Artist, SortKey::MostLiked]
    );
    assert_eq!(k.cycle(), SortKey::Catalog);
}
