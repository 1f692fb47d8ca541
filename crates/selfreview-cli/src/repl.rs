//! Conversation loop — continuation turns plus clear/download/submit commands.
//!
//! Lines are read with `rustyline`; history survives between runs.

use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::{debug, warn};

use selfreview_core::utils::{get_history_path, truncate_string};
use selfreview_providers::ChatBackend;

use crate::controller::{Conversation, Phase};
use crate::helpers;
use crate::multiline::continue_entry;

/// Words that end the session, compared case-insensitively.
const QUIT_WORDS: [&str; 5] = ["exit", "quit", "/exit", "/quit", ":q"];

/// A parsed line of REPL input.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Exit,
    Clear,
    Submit,
    Transcript,
    Download(Option<&'a str>),
    Send(&'a str),
}

fn parse_command(input: &str) -> Command<'_> {
    let trimmed = input.trim();
    if is_quit(trimmed) {
        return Command::Exit;
    }
    match trimmed.split_once(char::is_whitespace) {
        Some(("/download", dir)) => Command::Download(Some(dir.trim())),
        _ => match trimmed {
            "/clear" => Command::Clear,
            "/submit" => Command::Submit,
            "/transcript" => Command::Transcript,
            "/download" => Command::Download(None),
            _ => Command::Send(input),
        },
    }
}

/// Run the interactive loop until the user exits.
pub async fn run<B: ChatBackend>(
    mut convo: Conversation<B>,
    export_dir: &Path,
    markdown: bool,
) -> Result<()> {
    helpers::print_banner();
    println!(
        "{}",
        format!("provider: {} | temp: {:.1}", convo.form().ai, convo.form().temperature).dimmed()
    );

    let mut line_reader = LineReader::open()?;

    loop {
        let prompt = match convo.phase() {
            Phase::Idle => "(idle) ",
            _ => "You: ",
        };
        let Some(input) = line_reader.read(prompt) else {
            break;
        };

        match parse_command(&input) {
            Command::Exit => break,
            Command::Clear => {
                convo.clear();
                println!(
                    "{}",
                    "Conversation cleared. Form values kept; /submit to generate again.".dimmed()
                );
            }
            Command::Submit => {
                helpers::print_thinking();
                let result = convo.submit().await;
                helpers::clear_thinking();
                match result {
                    Ok(reply) => helpers::print_reply(&reply, markdown),
                    Err(e) => eprintln!("\n❌ {e}\n"),
                }
            }
            Command::Transcript => {
                for message in convo.transcript().messages() {
                    helpers::print_message(message, markdown);
                }
            }
            Command::Download(dir) => {
                let dir = dir.map(helpers::expand_tilde).unwrap_or_else(|| export_dir.to_path_buf());
                match convo.download(&dir) {
                    Ok(path) => println!("{} saved {}", "✓".green(), path.display()),
                    Err(e) => eprintln!("\n❌ {e}\n"),
                }
            }
            Command::Send(text) => {
                if convo.phase() == Phase::Idle && !text.trim().is_empty() {
                    println!("{}", "No conversation yet. Use /submit first.".dimmed());
                    continue;
                }

                convo.form_mut().user_input = text.to_string();
                debug!(input = %truncate_string(text.trim(), 60), "processing input");

                helpers::print_thinking();
                let result = convo.continue_conversation().await;
                helpers::clear_thinking();

                match result {
                    Ok(Some(reply)) => helpers::print_reply(&reply, markdown),
                    Ok(None) => {}
                    Err(e) => eprintln!("\n❌ {e}\n"),
                }
            }
        }
    }

    line_reader.close();
    println!("\nBye 👋");

    Ok(())
}

/// Line editor plus the file its history is persisted to.
struct LineReader {
    editor: DefaultEditor,
    history: PathBuf,
}

impl LineReader {
    fn open() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(500)?;

        let history = history_path();
        if let Err(e) = editor.load_history(&history) {
            debug!(path = %history.display(), error = %e, "no REPL history loaded");
        }
        Ok(Self { editor, history })
    }

    /// Next entry, or `None` on Ctrl-C, Ctrl-D, or a terminal error.
    ///
    /// A line ending in `\` continues the entry on the next line.
    fn read(&mut self, prompt: &str) -> Option<String> {
        let mut entry = String::new();
        let mut prompt = prompt;
        loop {
            let line = self.read_line(prompt)?;
            if !continue_entry(&mut entry, &line) {
                break;
            }
            prompt = "... ";
        }

        if !entry.trim().is_empty() {
            let _ = self.editor.add_history_entry(entry.as_str());
        }
        Some(entry)
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        match self.editor.readline(prompt) {
            Ok(line) => Some(line),
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => None,
            Err(e) => {
                warn!(error = %e, "terminal input failed");
                None
            }
        }
    }

    fn close(mut self) {
        if let Some(dir) = self.history.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = self.editor.save_history(&self.history) {
            debug!(error = %e, "REPL history not saved");
        }
    }
}

fn history_path() -> PathBuf {
    get_history_path().join("cli_history")
}

fn is_quit(input: &str) -> bool {
    QUIT_WORDS.iter().any(|w| w.eq_ignore_ascii_case(input))
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quit_words_ignore_case() {
        assert!(is_quit("Exit"));
        assert!(is_quit("QUIT"));
        assert!(is_quit("/exit"));
        assert!(!is_quit("exit the loop"));
        assert!(!is_quit(""));
    }

    #[test]
    fn parse_known_commands() {
        assert_eq!(parse_command("/clear"), Command::Clear);
        assert_eq!(parse_command("  /submit "), Command::Submit);
        assert_eq!(parse_command("/transcript"), Command::Transcript);
        assert_eq!(parse_command("/exit"), Command::Exit);
    }

    #[test]
    fn parse_download_with_and_without_dir() {
        assert_eq!(parse_command("/download"), Command::Download(None));
        assert_eq!(
            parse_command("/download ~/reviews"),
            Command::Download(Some("~/reviews"))
        );
    }

    #[test]
    fn parse_plain_text_is_sent_verbatim() {
        assert_eq!(
            parse_command("Make Q1 shorter"),
            Command::Send("Make Q1 shorter")
        );
        assert_eq!(parse_command("   "), Command::Send("   "));
    }

    #[test]
    fn history_file_lives_in_history_dir() {
        assert_eq!(history_path(), get_history_path().join("cli_history"));
    }
}
