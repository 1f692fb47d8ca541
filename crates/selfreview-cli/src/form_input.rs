//! Interactive form — prompts for whatever the flags and form file left unset.

use anyhow::{bail, Result};
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Password, Select};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use selfreview_core::form::FormValues;
use selfreview_providers::registry::{ProviderSpec, PROVIDERS};

use crate::multiline::Block;

/// Which fields were already fixed on the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fixed {
    pub provider: bool,
    pub temperature: bool,
}

/// Fill the form interactively. Text fields are asked only when empty.
///
/// `resolve_key` looks up a stored credential for the chosen provider; the
/// masked prompt appears only when it finds none.
pub fn fill<F>(form: &mut FormValues, fixed: Fixed, resolve_key: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let theme = ColorfulTheme::default();

    if !fixed.provider {
        let labels: Vec<&str> = PROVIDERS.iter().map(|s| s.display_name).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Select AI")
            .items(&labels)
            .default(provider_index(&form.ai))
            .interact()?;
        form.ai = PROVIDERS[choice].name.to_string();
    }

    if form.api_key.trim().is_empty() {
        if let Some(key) = resolve_key(&form.ai) {
            form.api_key = key;
        }
    }
    if form.api_key.trim().is_empty() {
        form.api_key = Password::with_theme(&theme)
            .with_prompt("API Key")
            .interact()?;
    }

    if !fixed.temperature {
        form.temperature = Input::<f64>::with_theme(&theme)
            .with_prompt("Temperature (0.0 - 1.0)")
            .default(form.temperature)
            .validate_with(|t: &f64| -> Result<(), &'static str> {
                if (0.0..=1.0).contains(t) {
                    Ok(())
                } else {
                    Err("temperature must be between 0 and 1")
                }
            })
            .interact_text()?;
    }

    let fields: [(&str, &mut String); 5] = [
        ("Instructions", &mut form.instructions),
        ("Context", &mut form.context),
        ("Accomplishments", &mut form.accomplishments),
        ("Summary of Goals", &mut form.goals),
        ("Performance Questions & Ratings", &mut form.questions_answers),
    ];
    let mut editor = DefaultEditor::new()?;
    for (label, value) in fields {
        if value.is_empty() {
            *value = read_block(&mut editor, label)?;
        }
    }

    Ok(())
}

/// Read a multi-line answer; an empty line (or Ctrl-D) ends it.
fn read_block(editor: &mut DefaultEditor, label: &str) -> Result<String> {
    println!("{} {}", label.bold(), "(empty line to finish)".dimmed());

    let mut block = Block::default();
    loop {
        match editor.readline("  │ ") {
            Ok(line) => {
                if !block.push(&line) {
                    break;
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(ReadlineError::Interrupted) => bail!("form entry cancelled"),
            Err(e) => return Err(e.into()),
        }
    }
    Ok(block.finish())
}

/// Position of `ai` in the selector, falling back to the first entry.
fn provider_index(ai: &str) -> usize {
    PROVIDERS
        .iter()
        .position(|s: &ProviderSpec| s.name == ai)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_index_known() {
        assert_eq!(provider_index("gemini"), 0);
        assert_eq!(provider_index("openai"), 1);
        assert_eq!(provider_index("claude"), 2);
    }

    #[test]
    fn provider_index_unknown_falls_back() {
        assert_eq!(provider_index("mistral"), 0);
    }
}
