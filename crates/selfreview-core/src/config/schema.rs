//! Configuration schema.
//!
//! Hierarchy: `Config` → `FormDefaults`, `ProvidersConfig`, `ExportConfig`.
//!
//! Keys are camelCase in the file and snake_case in Rust.

use serde::{Deserialize, Serialize};

use crate::form::{DEFAULT_AI, DEFAULT_TEMPERATURE};

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.selfreview/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub defaults: FormDefaults,
    pub providers: ProvidersConfig,
    pub export: ExportConfig,
}

// ─────────────────────────────────────────────
// Form defaults
// ─────────────────────────────────────────────

/// Values preselected in a fresh form.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormDefaults {
    /// Provider id (`"gemini"`, `"openai"`, `"claude"`).
    pub ai: String,
    /// Sampling temperature (0.0 – 1.0).
    pub temperature: f64,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            ai: DEFAULT_AI.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

// ─────────────────────────────────────────────
// Providers
// ─────────────────────────────────────────────

/// Credential and endpoint for a single vendor.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// Credential sent with every request to this vendor.
    pub api_key: String,
    /// Custom API base URL (overrides the vendor default).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &if self.is_configured() { "***" } else { "" })
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl ProviderConfig {
    /// True once a credential is stored for this vendor.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// One `ProviderConfig` per supported vendor.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvidersConfig {
    pub gemini: ProviderConfig,
    pub openai: ProviderConfig,
    pub claude: ProviderConfig,
}

impl ProvidersConfig {
    /// Get a provider config by id (e.g. `"claude"`).
    pub fn get_by_name(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "gemini" => Some(&self.gemini),
            "openai" => Some(&self.openai),
            "claude" => Some(&self.claude),
            _ => None,
        }
    }

    /// Iterate `(id, config)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ProviderConfig)> {
        [
            ("gemini", &self.gemini),
            ("openai", &self.openai),
            ("claude", &self.claude),
        ]
        .into_iter()
    }
}

// ─────────────────────────────────────────────
// Export
// ─────────────────────────────────────────────

/// Where downloaded transcripts are written.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Target directory; `~` is expanded.
    pub dir: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: ".".to_string(),
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.defaults.ai, "gemini");
        assert_eq!(config.defaults.temperature, 0.3);
        assert_eq!(config.export.dir, ".");
        assert!(!config.providers.claude.is_configured());
    }

    #[test]
    fn test_get_by_name() {
        let mut providers = ProvidersConfig::default();
        providers.openai.api_key = "sk-test".to_string();
        assert!(providers.get_by_name("openai").unwrap().is_configured());
        assert!(!providers.get_by_name("gemini").unwrap().is_configured());
        assert!(providers.get_by_name("mistral").is_none());
    }

    #[test]
    fn test_iter_order() {
        let names: Vec<&str> = ProvidersConfig::default().iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["gemini", "openai", "claude"]);
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = ProviderConfig {
            api_key: "sk-ant-secret".to_string(),
            api_base: None,
        };
        assert!(!format!("{config:?}").contains("secret"));
    }

    #[test]
    fn test_camel_case_round_trip() {
        let json = r#"{"providers": {"claude": {"apiKey": "k", "apiBase": "http://x"}}}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.providers.claude.api_key, "k");
        assert_eq!(config.providers.claude.api_base.as_deref(), Some("http://x"));
        // Missing sections fall back to defaults
        assert_eq!(config.defaults.ai, "gemini");
    }
}
