use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TallyError};

/// Overrides the settings directory (mainly for tests and portable installs).
pub const CONFIG_DIR_ENV: &str = "TALLY_CONFIG_DIR";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_data_file_string")]
    pub data_file: String,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_top_n() -> usize {
    5
}

fn default_data_file_string() -> String {
    default_data_file().to_string_lossy().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file_string(),
            top_n: default_top_n(),
        }
    }
}

fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("tally")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

fn default_data_file() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("tally")
        .join("transactions.csv")
}

pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// Read settings from `path`, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_settings_from(path: &Path) -> Settings {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return Settings::default(),
    };
    serde_json::from_str(&content).unwrap_or_else(|e| {
        warn!("ignoring unreadable settings file {}: {e}", path.display());
        Settings::default()
    })
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(settings, &settings_path())
}

pub fn save_settings_to(settings: &Settings, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(settings).map_err(|e| TallyError::Settings(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

/// Which backing file to use: an explicit path wins over the configured one.
pub fn resolve_data_file(explicit: Option<PathBuf>, settings: &Settings) -> PathBuf {
    match explicit {
        Some(path) => path,
        None => PathBuf::from(expand_home(&settings.data_file)),
    }
}

pub fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            data_file: "/tmp/test/transactions.csv".to_string(),
            top_n: 3,
        };
        save_settings_to(&settings, &path).unwrap();
        let loaded = load_settings_from(&path);
        assert_eq!(loaded.data_file, "/tmp/test/transactions.csv");
        assert_eq!(loaded.top_n, 3);
    }

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("nope.json"));
        assert_eq!(s.top_n, 5);
        assert!(s.data_file.ends_with("transactions.csv"));
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let json = r#"{"data_file": "/tmp/t.csv"}"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.top_n, 5);
        assert_eq!(s.data_file, "/tmp/t.csv");
    }

    #[test]
    fn test_load_garbage_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings_from(&path).top_n, 5);
    }

    #[test]
    fn test_save_creates_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep").join("nested").join("settings.json");
        save_settings_to(&Settings::default(), &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let settings = Settings {
            data_file: "/configured.csv".into(),
            top_n: 5,
        };
        assert_eq!(
            resolve_data_file(Some(PathBuf::from("/explicit.csv")), &settings),
            PathBuf::from("/explicit.csv")
        );
        assert_eq!(resolve_data_file(None, &settings), PathBuf::from("/configured.csv"));
    }
}
