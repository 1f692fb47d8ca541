//! `selfreview onboard` — first-run setup under `~/.selfreview`.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use selfreview_core::config::{get_config_path, save_config, Config};
use selfreview_core::utils::{get_data_path, get_history_path};

/// Starter form file. Provider and temperature come from config, so only
/// the text fields appear here.
const SAMPLE_FORM: &str = r#"{
  "instructions": "Answer each question in SBI format.",
  "context": "Role, team, and review period.",
  "accomplishments": "One line per accomplishment, with measurable impact.",
  "goals": "Goals for the period and how each went.",
  "questionsAnswers": "Q1: ... (rating)\nQ2: ... (rating)"
}
"#;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "📝 Selfreview setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if config_path.exists() {
        report(&config_path, false);
    } else {
        save_config(&Config::default(), Some(&config_path))
            .with_context(|| format!("could not write {}", config_path.display()))?;
        report(&config_path, true);
    }

    let form_path = get_data_path().join("form.json");
    let created = write_if_absent(&form_path, SAMPLE_FORM)
        .with_context(|| format!("could not write {}", form_path.display()))?;
    report(&form_path, created);

    let history = get_history_path();
    std::fs::create_dir_all(&history)
        .with_context(|| format!("could not create {}", history.display()))?;

    println!();
    println!("  Next: add an API key under {} in the config,", "providers".bold());
    println!("  then run {}", "selfreview review --form ~/.selfreview/form.json".green());
    println!();

    Ok(())
}

fn report(path: &Path, created: bool) {
    let verb = if created { "created" } else { "kept existing" };
    println!("  {} {} {}", "✓".green(), verb, path.display());
}

/// Write `contents` to `path` unless something is already there.
///
/// Returns whether the file was written.
fn write_if_absent(path: &Path, contents: &str) -> std::io::Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(path, contents)?;
    Ok(true)
}
