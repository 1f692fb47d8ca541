//! `selfreview status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use selfreview_core::config::{get_config_path, load_config};
use selfreview_providers::find_by_name;

/// Where a provider's key would come from, if anywhere.
fn key_source(configured: bool, env_key: &str) -> Option<String> {
    if configured {
        Some("config".to_string())
    } else if std::env::var(env_key).is_ok_and(|v| !v.trim().is_empty()) {
        Some(format!("${env_key}"))
    } else {
        None
    }
}

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "📝 Selfreview Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!(
        "  {:<18} {} | {}",
        "Defaults:".bold(),
        format!("ai: {}", config.defaults.ai),
        format!("temp: {:.1}", config.defaults.temperature).dimmed(),
    );

    let export_dir = crate::helpers::expand_tilde(&config.export.dir);
    println!("  {:<18} {}", "Export dir:".bold(), export_dir.display());

    println!();
    println!("  {}", "Providers:".bold());

    for (name, provider) in config.providers.iter() {
        let Some(spec) = find_by_name(name) else {
            continue;
        };

        let status = match key_source(provider.is_configured(), spec.env_key) {
            Some(source) => format!("{} (key from {})", "✓".green(), source),
            None => format!("{}", "· no key".dimmed()),
        };
        let endpoint = provider.api_base.as_deref().unwrap_or(spec.default_api_base);
        println!(
            "    {:<10} {:<26} {}",
            spec.display_name,
            spec.model.dimmed(),
            status
        );
        println!("    {:<10} {}", "", endpoint.dimmed());
    }

    println!();

    Ok(())
}
