//! Shared CLI helpers — path expansion, message printing, banner.

use std::path::PathBuf;

use colored::Colorize;
use termimad::MadSkin;

use selfreview_core::types::{Message, Role};

/// Resolve a leading `~` or `~/` against the home directory.
///
/// `~user` forms and paths without a tilde are returned as given.
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(path),
    };
    match dirs_next::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Speaker label shown above each message.
fn speaker(role: Role) -> colored::ColoredString {
    match role {
        Role::User => "You".green().bold(),
        Role::Assistant => "AI".cyan().bold(),
        Role::System => "System".dimmed(),
    }
}

/// Body text for one entry. Assistant replies are rendered as markdown
/// when `markdown` is set; error replies always print plain red.
fn render_body(message: &Message, markdown: bool) -> String {
    match message.role {
        Role::Assistant if message.content.starts_with("Error: ") => {
            message.content.red().to_string()
        }
        Role::Assistant if markdown => MadSkin::default().term_text(&message.content).to_string(),
        _ => message.content.clone(),
    }
}

/// Print one transcript entry.
pub fn print_message(message: &Message, markdown: bool) {
    println!();
    println!("{}", speaker(message.role));
    println!("{}", render_body(message, markdown).trim_end());
    println!();
}

/// Print an assistant reply.
pub fn print_reply(reply: &str, markdown: bool) {
    print_message(&Message::assistant(reply), markdown);
}

/// Print the banner shown when the conversation loop starts.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "📝 Self-Review AI Assistant".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Enter sends; end a line with \\ to continue. Commands: /clear, /download [dir], /submit, /transcript, /exit".dimmed()
    );
    println!();
}

/// Print a "thinking" placeholder while a request is in flight.
pub fn print_thinking() {
    eprint!("{}", "⠿ generating...".dimmed());
}

/// Clear the "thinking" placeholder.
pub fn clear_thinking() {
    eprint!("\r{}\r", " ".repeat(40));
}
