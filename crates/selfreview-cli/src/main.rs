//! Selfreview CLI — entry point.
//!
//! # Commands
//!
//! - `selfreview review [--form FILE] [--provider ID] ...` — fill the form,
//!   generate a draft, then keep refining it in a conversation loop
//! - `selfreview onboard` — initialize config and a sample form file
//! - `selfreview status` — show configuration and provider status

mod controller;
mod form_input;
mod helpers;
mod multiline;
mod onboard;
mod repl;
mod status;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;

use selfreview_core::config::{load_config, Config};
use selfreview_core::form::{FormFile, FormValues};
use selfreview_providers::{find_by_name, ProviderAdapter};

use crate::controller::Conversation;
use crate::form_input::Fixed;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// 📝 Selfreview — draft your performance self-review with an LLM
#[derive(Parser)]
#[command(name = "selfreview", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a self-review draft and refine it conversationally
    Review(ReviewArgs),

    /// Initialize configuration and a sample form file
    Onboard,

    /// Show configuration and provider status
    Status,
}

#[derive(Args, Debug, Default)]
struct ReviewArgs {
    /// Provider id: gemini, openai or claude
    #[arg(short, long)]
    provider: Option<String>,

    /// API key for the selected provider (falls back to config, then env)
    #[arg(long)]
    api_key: Option<String>,

    /// Sampling temperature, 0.0 to 1.0
    #[arg(short, long)]
    temperature: Option<f64>,

    /// JSON file with prepared form answers
    #[arg(short, long)]
    form: Option<PathBuf>,

    #[arg(long)]
    instructions: Option<String>,

    #[arg(long)]
    context: Option<String>,

    #[arg(long)]
    accomplishments: Option<String>,

    #[arg(long)]
    goals: Option<String>,

    /// Performance questions and ratings
    #[arg(long)]
    questions: Option<String>,

    /// Directory for /download (defaults to config `export.dir`)
    #[arg(short, long)]
    out: Option<String>,

    /// Print replies as plain text instead of rendered markdown
    #[arg(long, default_value_t = false)]
    no_markdown: bool,

    /// Print the first draft and exit without prompting
    #[arg(long, default_value_t = false)]
    no_interactive: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    logs: bool,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Review(args) => {
            init_logging(args.logs);
            run_review(args).await
        }
        Commands::Onboard => onboard::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Review command
// ─────────────────────────────────────────────

async fn run_review(args: ReviewArgs) -> Result<()> {
    let config = load_config(None);
    let interactive = !args.no_interactive;
    let markdown = !args.no_markdown;

    let fixed = Fixed {
        provider: args.provider.is_some(),
        temperature: args.temperature.is_some(),
    };
    let export_dir = helpers::expand_tilde(args.out.as_deref().unwrap_or(&config.export.dir));
    let mut form = build_form(&config, args)?;

    if interactive {
        form_input::fill(&mut form, fixed, |ai| resolve_api_key(&config, ai))?;
    } else if form.api_key.trim().is_empty() {
        form.api_key = resolve_api_key(&config, &form.ai).unwrap_or_default();
    }

    debug!(?form, "form ready");

    let adapter = ProviderAdapter::from_config(&config.providers);
    let mut convo = Conversation::new(adapter, form);

    helpers::print_thinking();
    let result = convo.submit().await;
    helpers::clear_thinking();
    let reply = result.context("could not generate the self-review")?;
    helpers::print_reply(&reply, markdown);

    if interactive {
        repl::run(convo, &export_dir, markdown).await?;
    }

    Ok(())
}

/// Layer the form: config defaults, then the form file, then flags.
fn build_form(config: &Config, args: ReviewArgs) -> Result<FormValues> {
    let mut form = FormValues {
        ai: config.defaults.ai.clone(),
        temperature: config.defaults.temperature,
        ..FormValues::default()
    };

    if let Some(path) = &args.form {
        let path = helpers::expand_tilde(&path.to_string_lossy());
        let file = FormFile::load(&path)
            .with_context(|| format!("failed to load form file {}", path.display()))?;
        form.apply_file(file);
    }

    let overrides = [
        (args.instructions, &mut form.instructions),
        (args.context, &mut form.context),
        (args.accomplishments, &mut form.accomplishments),
        (args.goals, &mut form.goals),
        (args.questions, &mut form.questions_answers),
    ];
    for (value, field) in overrides {
        if let Some(value) = value {
            *field = value;
        }
    }

    if let Some(ai) = args.provider {
        form.ai = ai;
    }
    if let Some(temperature) = args.temperature {
        form.temperature = temperature;
    }
    if let Some(key) = args.api_key {
        form.api_key = key;
    }

    Ok(form)
}

/// Stored credential for `ai`: config first, then the vendor's env var.
fn resolve_api_key(config: &Config, ai: &str) -> Option<String> {
    if let Some(provider) = config.providers.get_by_name(ai) {
        if provider.is_configured() {
            return Some(provider.api_key.clone());
        }
    }
    let spec = find_by_name(ai)?;
    std::env::var(spec.env_key)
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("selfreview=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_review_flags() {
        let cli = Cli::parse_from([
            "selfreview",
            "review",
            "--provider",
            "claude",
            "-t",
            "0.7",
            "--no-interactive",
        ]);
        match cli.command {
            Commands::Review(args) => {
                assert_eq!(args.provider.as_deref(), Some("claude"));
                assert_eq!(args.temperature, Some(0.7));
                assert!(args.no_interactive);
            }
            _ => panic!("expected review"),
        }
    }

    #[test]
    fn build_form_uses_config_defaults() {
        let mut config = Config::default();
        config.defaults.ai = "openai".to_string();
        config.defaults.temperature = 0.5;

        let form = build_form(&config, ReviewArgs::default()).unwrap();
        assert_eq!(form.ai, "openai");
        assert_eq!(form.temperature, 0.5);
        assert!(form.api_key.is_empty());
    }

    #[test]
    fn build_form_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.json");
        std::fs::write(
            &path,
            r#"{"ai": "claude", "goals": "from file", "accomplishments": "shipped"}"#,
        )
        .unwrap();

        let args = ReviewArgs {
            form: Some(path),
            goals: Some("from flag".to_string()),
            provider: Some("gemini".to_string()),
            ..ReviewArgs::default()
        };
        let form = build_form(&Config::default(), args).unwrap();
        assert_eq!(form.ai, "gemini");
        assert_eq!(form.goals, "from flag");
        assert_eq!(form.accomplishments, "shipped");
    }

    #[test]
    fn build_form_missing_file_is_error() {
        let args = ReviewArgs {
            form: Some(PathBuf::from("/nonexistent/selfreview/form.json")),
            ..ReviewArgs::default()
        };
        assert!(build_form(&Config::default(), args).is_err());
    }

    #[test]
    fn resolve_key_prefers_config() {
        let mut config = Config::default();
        config.providers.openai.api_key = "sk-config".to_string();
        assert_eq!(resolve_api_key(&config, "openai").as_deref(), Some("sk-config"));
    }

    #[test]
    fn resolve_key_unknown_provider() {
        assert!(resolve_api_key(&Config::default(), "mistral").is_none());
    }
}
