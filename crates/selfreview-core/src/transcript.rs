//! The conversation transcript — ordered, append-only, held in memory.
//!
//! Array order is chronological order. Individual entries are never
//! removed; only [`Transcript::clear`] resets the whole list.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::types::{Message, Role};

/// File name used when exporting a transcript.
pub const EXPORT_FILENAME: &str = "self-review-conversation.txt";

/// Stored in place of an empty assistant reply.
pub const EMPTY_REPLY: &str = "No response from AI.";

/// Separator line between exported messages.
const EXPORT_SEPARATOR: &str = "\n\n---\n\n";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any prior content with exactly one user and one assistant entry.
    pub fn seed(&mut self, user: impl Into<String>, assistant: impl Into<String>) {
        self.messages.clear();
        self.push_user(user);
        self.push_assistant(assistant);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant reply; an empty reply is stored as [`EMPTY_REPLY`].
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        let content = content.into();
        let content = if content.is_empty() {
            EMPTY_REPLY.to_string()
        } else {
            content
        };
        self.messages.push(Message::assistant(content));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Render as `ROLE:\n<content>` blocks separated by a `---` rule.
    pub fn export_text(&self) -> String {
        self.messages
            .iter()
            .map(|m| format!("{}:\n{}", m.role.label(), m.content))
            .collect::<Vec<_>>()
            .join(EXPORT_SEPARATOR)
    }

    /// Write the export to `dir/EXPORT_FILENAME`, creating `dir` if needed.
    pub fn save_to(&self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(EXPORT_FILENAME);
        std::fs::write(&path, self.export_text())?;
        debug!(
            path = %path.display(),
            messages = self.messages.len(),
            "Transcript exported"
        );
        Ok(path)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
