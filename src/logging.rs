//! File logging. The terminal belongs to the TUI, so records only go to disk.

use std::path::PathBuf;

use log::LevelFilter;

use crate::config::{LogSettings, default_state_dir};

fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Resolve the log file path from settings or the XDG state directory.
pub fn log_path(settings: &LogSettings) -> PathBuf {
    settings.file.clone().unwrap_or_else(|| {
        default_state_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("melodicstream.log")
    })
}

pub fn setup_logging(settings: &LogSettings) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let path = log_path(settings);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(parse_level(&settings.level))
        // zbus is chatty at debug level.
        .level_for("zbus", LevelFilter::Warn)
        .chain(fern::log_file(&path)?)
        .apply()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_level_accepts_names_and_defaults_to_info() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn explicit_log_file_wins() {
        let settings = LogSettings {
            file: Some("/tmp/ms.log".into()),
            ..LogSettings::default()
        };
        assert_eq!(log_path(&settings), PathBuf::from("/tmp/ms.log"));
    }
}
