//! Config loader — reads `~/.selfreview/config.json` and merges env vars.
//!
//! Precedence, lowest first: built-in defaults, the JSON file, then
//! `SELFREVIEW_<SECTION>__<FIELD>` environment variables.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use super::schema::{Config, ProviderConfig};

const ENV_PREFIX: &str = "SELFREVIEW_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config {} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `~/.selfreview/config.json`.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load the config at `path` (or the default location) with env overrides.
///
/// Never fails: a missing file is normal, and an unreadable or malformed
/// one is reported with `warn!` and replaced by defaults.
pub fn load_config(path: Option<&Path>) -> Config {
    let path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

    let base = match read_config(&path) {
        Ok(config) => config,
        Err(ConfigError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Config::default()
        }
        Err(e) => {
            warn!("{e}; using defaults");
            Config::default()
        }
    };

    apply_env_overrides(base)
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = serde_json::from_str(&raw).map_err(|source| ConfigError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Write `config` as pretty camelCase JSON, creating the parent directory.
pub fn save_config(config: &Config, path: Option<&Path>) -> Result<(), ConfigError> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);
    let io_err = |source: std::io::Error| ConfigError::Io {
        path: path.clone(),
        source,
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(io_err)?;
    }
    let json = serde_json::to_string_pretty(config).map_err(|source| ConfigError::Json {
        path: path.clone(),
        source,
    })?;
    std::fs::write(&path, json).map_err(io_err)?;

    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Non-empty value of `SELFREVIEW_{key}`.
fn env_value(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}"))
        .ok()
        .filter(|v| !v.is_empty())
}

/// Overlay `SELFREVIEW_*` variables:
/// `DEFAULTS__AI`, `DEFAULTS__TEMPERATURE`,
/// `PROVIDERS__{GEMINI,OPENAI,CLAUDE}__API_KEY` / `__API_BASE`, `EXPORT__DIR`.
fn apply_env_overrides(mut config: Config) -> Config {
    if let Some(ai) = env_value("DEFAULTS__AI") {
        config.defaults.ai = ai;
    }
    if let Some(raw) = env_value("DEFAULTS__TEMPERATURE") {
        match raw.parse::<f64>() {
            Ok(t) => config.defaults.temperature = t,
            Err(_) => warn!(value = %raw, "ignoring non-numeric temperature override"),
        }
    }
    if let Some(dir) = env_value("EXPORT__DIR") {
        config.export.dir = dir;
    }

    let providers = &mut config.providers;
    for (section, provider) in [
        ("GEMINI", &mut providers.gemini),
        ("OPENAI", &mut providers.openai),
        ("CLAUDE", &mut providers.claude),
    ] {
        override_provider(provider, section);
    }

    config
}

fn override_provider(provider: &mut ProviderConfig, section: &str) {
    if let Some(key) = env_value(&format!("PROVIDERS__{section}__API_KEY")) {
        provider.api_key = key;
    }
    if let Some(base) = env_value(&format!("PROVIDERS__{section}__API_BASE")) {
        provider.api_base = Some(base);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_file(json: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, json).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.json")));
        assert_eq!(config.export.dir, ".");
        assert_eq!(config.defaults.temperature, 0.3);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let (_dir, path) = config_file(r#"{"defaults": {"ai": "claude"}, "export": {"dir": "~/reviews"}}"#);

        let config = load_config(Some(&path));
        assert_eq!(config.defaults.ai, "claude");
        assert_eq!(config.defaults.temperature, 0.3);
        assert_eq!(config.export.dir, "~/reviews");
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let (_dir, path) = config_file("{ defaults: ");
        assert!(matches!(read_config(&path), Err(ConfigError::Json { .. })));

        let config = load_config(Some(&path));
        assert_eq!(config.defaults.ai, "gemini");
        assert!(!config.providers.openai.is_configured());
    }

    #[test]
    fn saved_config_round_trips_into_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".selfreview").join("config.json");

        let mut config = Config::default();
        config.defaults.ai = "openai".to_string();
        config.providers.openai.api_key = "sk-review".to_string();
        save_config(&config, Some(&path)).unwrap();

        let loaded = read_config(&path).unwrap();
        assert_eq!(loaded.defaults.ai, "openai");
        assert_eq!(loaded.providers.openai.api_key, "sk-review");
    }

    #[test]
    fn saved_keys_are_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.providers.claude.api_key = "sk-ant".to_string();
        save_config(&config, Some(&path)).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let claude = &raw["providers"]["claude"];
        assert_eq!(claude["apiKey"], "sk-ant");
        assert!(claude.get("api_key").is_none());
        assert!(claude.get("apiBase").is_none());
    }

    #[test]
    fn env_sets_claude_key() {
        std::env::set_var("SELFREVIEW_PROVIDERS__CLAUDE__API_KEY", "sk-from-env");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("SELFREVIEW_PROVIDERS__CLAUDE__API_KEY");

        assert_eq!(config.providers.claude.api_key, "sk-from-env");
    }

    #[test]
    fn env_sets_gemini_base() {
        std::env::set_var("SELFREVIEW_PROVIDERS__GEMINI__API_BASE", "http://127.0.0.1:8089");
        let config = apply_env_overrides(Config::default());
        std::env::remove_var("SELFREVIEW_PROVIDERS__GEMINI__API_BASE");

        assert_eq!(
            config.providers.gemini.api_base.as_deref(),
            Some("http://127.0.0.1:8089")
        );
    }
}
