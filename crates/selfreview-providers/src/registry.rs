//! Provider registry — static specs for the three supported vendors.
//!
//! Each `ProviderSpec` describes how to reach one vendor: its endpoint,
//! hardcoded model, output-token ceiling, and conventional env var.

use std::str::FromStr;

use crate::error::ProviderError;

// ─────────────────────────────────────────────
// ProviderKind — closed set of vendors
// ─────────────────────────────────────────────

/// The supported vendors. Unknown ids are an error, never a fallback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Turn-based chat API (history + new user turn).
    Gemini,
    /// Stateless message-array API.
    OpenAi,
    /// Messages API with a separate system field.
    Claude,
}

impl ProviderKind {
    pub fn spec(&self) -> &'static ProviderSpec {
        match self {
            ProviderKind::Gemini => &PROVIDERS[0],
            ProviderKind::OpenAi => &PROVIDERS[1],
            ProviderKind::Claude => &PROVIDERS[2],
        }
    }

    /// Form id (`"gemini"`, `"openai"`, `"claude"`).
    pub fn as_str(&self) -> &'static str {
        self.spec().name
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    /// Ids are matched exactly, as the form's option values are.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gemini" => Ok(ProviderKind::Gemini),
            "openai" => Ok(ProviderKind::OpenAi),
            "claude" => Ok(ProviderKind::Claude),
            other => Err(ProviderError::InvalidSelection(other.to_string())),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─────────────────────────────────────────────
// ProviderSpec — static metadata for one vendor
// ─────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct ProviderSpec {
    /// Form id, also the config key under `providers`.
    pub name: &'static str,
    /// Human-readable name for logs and prompts.
    pub display_name: &'static str,
    /// Conventional environment variable holding the vendor's API key.
    pub env_key: &'static str,
    /// API base URL; overridable per provider in config.
    pub default_api_base: &'static str,
    /// Model every request is pinned to.
    pub model: &'static str,
    /// Output-token ceiling, for vendors that require one.
    pub max_tokens: Option<u32>,
}

/// All supported vendors, in selector order.
pub static PROVIDERS: &[ProviderSpec] = &[
    ProviderSpec {
        name: "gemini",
        display_name: "Gemini",
        env_key: "GEMINI_API_KEY",
        default_api_base: "https://generativelanguage.googleapis.com",
        model: "gemini-1.5-flash",
        max_tokens: None,
    },
    ProviderSpec {
        name: "openai",
        display_name: "OpenAI",
        env_key: "OPENAI_API_KEY",
        default_api_base: "https://api.openai.com/v1",
        model: "gpt-4o",
        max_tokens: None,
    },
    ProviderSpec {
        name: "claude",
        display_name: "Claude",
        env_key: "ANTHROPIC_API_KEY",
        default_api_base: "https://api.anthropic.com",
        model: "claude-3-opus-20240229",
        max_tokens: Some(4096),
    },
];

/// Look up a spec by form id.
pub fn find_by_name(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|s| s.name == name)
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
