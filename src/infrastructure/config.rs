use crate::domain::error::AppError;
use crate::domain::model::{StoredApiKeys, UserPreferences};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Anonymous per-installation id, passed through untouched.
    pub install_id: Option<String>,
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub keys: StoredApiKeys,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub logging: Logging,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Logging {
    #[serde(default = "default_enable")]
    pub enable: bool,
    pub path: Option<String>,
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CacheConfig {
    #[serde(default = "default_enable")]
    pub enable: bool,
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    /// Most-recent entries written to the snapshot store.
    #[serde(default = "default_backup_max")]
    pub backup_max: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub http_proxy: Option<String>,
    #[serde(default = "default_lingva_url")]
    pub lingva_url: String,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            enable: true,
            path: None,
            level: default_log_level(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable: true,
            capacity: default_cache_capacity(),
            ttl_secs: default_cache_ttl_secs(),
            backup_max: default_backup_max(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            http_proxy: None,
            lingva_url: default_lingva_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            install_id: None,
            preferences: UserPreferences::default(),
            keys: StoredApiKeys::default(),
            cache: CacheConfig::default(),
            network: NetworkConfig::default(),
            logging: Logging::default(),
        }
    }
}

// Defaults
fn default_theme() -> String {
    "classic".to_string()
}
fn default_enable() -> bool {
    true
}
fn default_log_level() -> String {
    "WARN".to_string()
}
fn default_cache_capacity() -> usize {
    500
}
fn default_cache_ttl_secs() -> u64 {
    24 * 60 * 60
}
fn default_backup_max() -> usize {
    100
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_lingva_url() -> String {
    "https://lingva.ml/api/v1".to_string()
}

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("omnilate").join("config.toml"))
}

/// Snapshot database path (uses the cache directory by default)
pub fn get_snapshot_path() -> PathBuf {
    // ~/.cache/omnilate/snapshot.db (Linux)
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("omnilate")
        .join("snapshot.db")
}

pub fn parse_config(content: &str) -> Result<Config, AppError> {
    Ok(toml::from_str::<Config>(content)?)
}

pub fn load_config() -> Result<Config, AppError> {
    match get_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(path: &Path) -> Result<Config, AppError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(path)?;
    match parse_config(&content) {
        Ok(config) => Ok(config),
        Err(e) => {
            eprintln!(
                "Warning: Failed to parse config file: {}. Using defaults.",
                e
            );
            Ok(Config::default())
        }
    }
}

/// Write the configuration back, e.g. after a key has been validated.
pub fn save_config_to(config: &Config, path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml_content = toml::to_string_pretty(config)
        .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;
    fs::write(path, toml_content)
        .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;
    Ok(())
}

pub fn save_config(config: &Config) -> Result<(), AppError> {
    let path = get_config_path()
        .ok_or_else(|| AppError::Config("Cannot determine config directory".to_string()))?;
    save_config_to(config, &path)
}

pub fn generate_config_sample() -> Result<(), AppError> {
    let path = get_config_path()
        .ok_or_else(|| AppError::Config("Cannot determine config directory".to_string()))?;

    if path.exists() {
        eprintln!("Config file already exists at: {}", path.display());
        return Ok(());
    }

    let sample = Config {
        install_id: Some(uuid::Uuid::new_v4().to_string()),
        ..Config::default()
    };
    save_config_to(&sample, &path)?;
    println!("Generated config file at: {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Credential, ServiceId, Tier};

    #[test]
    fn save_then_load_keeps_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.keys.deepl = Some(Credential {
            key: "abc:fx".to_string(),
            tier: Some(Tier::Free),
            validated: true,
            validated_at: Some(1_700_000_000),
        });
        config.preferences.enabled_services = vec![ServiceId::DeepL, ServiceId::Google];

        save_config_to(&config, &path).unwrap();
        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "preferences = [").unwrap();
        assert_eq!(load_config_from(&path).unwrap(), Config::default());
    }
}
