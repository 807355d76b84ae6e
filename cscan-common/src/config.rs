//! Configuration loading and data folder resolution

use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the data folder.
pub const DATA_FOLDER_ENV: &str = "CSCAN_DATA_FOLDER";

/// Environment variable naming the recognizer endpoint.
pub const OCR_URL_ENV: &str = "CSCAN_OCR_URL";

/// Default recognizer endpoint (a local recognizer sidecar).
pub const DEFAULT_OCR_URL: &str = "http://127.0.0.1:8089/recognize";

/// Default vocabulary file name, relative to the data folder.
pub const DEFAULT_VOCABULARY_FILE: &str = "channels.csv";

/// Optional TOML configuration file contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    /// Data folder override (database + vocabulary file location)
    pub data_folder: Option<String>,
    /// Recognizer endpoint override
    pub ocr_url: Option<String>,
    /// Vocabulary file override; absolute, or relative to the data folder
    pub vocabulary_file: Option<String>,
}

/// Load the TOML config file if one exists.
///
/// Missing file is normal and yields defaults; an unreadable or unparsable
/// file is logged and also yields defaults rather than failing startup.
pub fn load_toml_config() -> TomlConfig {
    let Some(path) = config_file_path() else {
        return TomlConfig::default();
    };
    if !path.exists() {
        return TomlConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed config file {}: {}", path.display(), e);
                TomlConfig::default()
            }
        },
        Err(e) => {
            warn!("Ignoring unreadable config file {}: {}", path.display(), e);
            TomlConfig::default()
        }
    }
}

/// Configuration file location for the platform
fn config_file_path() -> Option<PathBuf> {
    if cfg!(target_os = "linux") {
        // ~/.config/cscan/config.toml first, then /etc/cscan/config.toml
        if let Some(user_config) = dirs::config_dir().map(|d| d.join("cscan").join("config.toml")) {
            if user_config.exists() {
                return Some(user_config);
            }
        }
        let system_config = PathBuf::from("/etc/cscan/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
        None
    } else {
        dirs::config_dir().map(|d| d.join("cscan").join("config.toml"))
    }
}

/// Resolve the data folder in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable (`CSCAN_DATA_FOLDER`)
/// 3. TOML config file (`data_folder` key)
/// 4. OS-dependent default (fallback)
pub fn resolve_data_folder(cli_arg: Option<&str>, config: &TomlConfig) -> Result<PathBuf> {
    if let Some(path) = cli_arg {
        return Ok(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var(DATA_FOLDER_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = &config.data_folder {
        return Ok(PathBuf::from(path));
    }

    Ok(default_data_folder())
}

/// OS-dependent default data folder path
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("cscan"))
        .unwrap_or_else(|| PathBuf::from("./cscan_data"))
}

/// Resolve the recognizer endpoint: ENV → TOML → built-in default.
pub fn resolve_ocr_url(config: &TomlConfig) -> String {
    if let Ok(url) = std::env::var(OCR_URL_ENV) {
        if !url.trim().is_empty() {
            return url;
        }
    }
    if let Some(url) = &config.ocr_url {
        if !url.trim().is_empty() {
            return url.clone();
        }
    }
    DEFAULT_OCR_URL.to_string()
}

/// Resolve the vocabulary file path.
///
/// A configured relative path is taken relative to the data folder.
pub fn resolve_vocabulary_path(data_folder: &Path, config: &TomlConfig) -> PathBuf {
    match &config.vocabulary_file {
        Some(file) => {
            let path = PathBuf::from(file);
            if path.is_absolute() {
                path
            } else {
                data_folder.join(path)
            }
        }
        None => data_folder.join(DEFAULT_VOCABULARY_FILE),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn cli_argument_takes_priority() {
        std::env::remove_var(DATA_FOLDER_ENV);
        let config = TomlConfig {
            data_folder: Some("/from/toml".to_string()),
            ..Default::default()
        };
        let folder = resolve_data_folder(Some("/from/cli"), &config).unwrap();
        assert_eq!(folder, PathBuf::from("/from/cli"));
    }

    #[test]
    #[serial]
    fn env_beats_toml_for_data_folder() {
        std::env::set_var(DATA_FOLDER_ENV, "/from/env");
        let config = TomlConfig {
            data_folder: Some("/from/toml".to_string()),
            ..Default::default()
        };
        let folder = resolve_data_folder(None, &config).unwrap();
        std::env::remove_var(DATA_FOLDER_ENV);
        assert_eq!(folder, PathBuf::from("/from/env"));
    }

    #[test]
    #[serial]
    fn ocr_url_falls_back_to_default() {
        std::env::remove_var(OCR_URL_ENV);
        assert_eq!(resolve_ocr_url(&TomlConfig::default()), DEFAULT_OCR_URL);

        let config = TomlConfig {
            ocr_url: Some("http://ocr.internal:9000/recognize".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_ocr_url(&config), "http://ocr.internal:9000/recognize");
    }

    #[test]
    fn vocabulary_path_defaults_relative_to_data_folder() {
        let data = Path::new("/var/lib/cscan");
        let path = resolve_vocabulary_path(data, &TomlConfig::default());
        assert_eq!(path, PathBuf::from("/var/lib/cscan/channels.csv"));
    }

    #[test]
    fn vocabulary_path_honors_absolute_override() {
        let data = Path::new("/var/lib/cscan");
        let config = TomlConfig {
            vocabulary_file: Some("/srv/shared/channels.csv".to_string()),
            ..Default::default()
        };
        let path = resolve_vocabulary_path(data, &config);
        assert_eq!(path, PathBuf::from("/srv/shared/channels.csv"));
    }

    #[test]
    fn vocabulary_path_joins_relative_override() {
        let data = Path::new("/var/lib/cscan");
        let config = TomlConfig {
            vocabulary_file: Some("vocab/labels.csv".to_string()),
            ..Default::default()
        };
        let path = resolve_vocabulary_path(data, &config);
        assert_eq!(path, PathBuf::from("/var/lib/cscan/vocab/labels.csv"));
    }
}
