//! The self-review form — field state, validation, and prompt assembly.
//!
//! The five free-text fields are folded into a single user prompt; the
//! fixed [`SYSTEM_PROMPT`] frames the reply format. Form values persist
//! across a transcript reset.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::types::Message;

/// Instruction sent as the system entry of the first turn.
pub const SYSTEM_PROMPT: &str = "You are an AI assistant helping to build a self-review for an \
Engineering Leadership role. Use strict SBI (Situation - Behavior - Impact) format for all \
responses. Do not synthesize any content not present in the input. Avoid repetition between \
answers; cross-reference accomplishments. Use leadership-appropriate, professional phrasing. \
Keep answers concise, measurable, factual, and fully backed by provided accomplishments. \
Strictly no assumptions or exaggerations.";

/// Provider preselected in a fresh form.
pub const DEFAULT_AI: &str = "gemini";

/// Temperature preselected in a fresh form.
pub const DEFAULT_TEMPERATURE: f64 = 0.3;

// ─────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum FormError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("temperature must be between 0 and 1, got {0}")]
    TemperatureOutOfRange(f64),

    #[error("failed to read form file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse form file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

// ─────────────────────────────────────────────
// FormValues
// ─────────────────────────────────────────────

/// Flat form state: provider choice, credential, temperature, the five
/// text fields, and the scratch input for continuation turns.
#[derive(Clone, PartialEq)]
pub struct FormValues {
    /// Provider id as entered (`"gemini"`, `"openai"`, `"claude"`). Not
    /// validated here; unknown ids surface as an adapter error reply.
    pub ai: String,
    pub api_key: String,
    /// Sampling temperature in [0, 1].
    pub temperature: f64,
    pub instructions: String,
    pub context: String,
    pub accomplishments: String,
    pub goals: String,
    pub questions_answers: String,
    /// Scratch field for the next continuation message.
    pub user_input: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            ai: DEFAULT_AI.to_string(),
            api_key: String::new(),
            temperature: DEFAULT_TEMPERATURE,
            instructions: String::new(),
            context: String::new(),
            accomplishments: String::new(),
            goals: String::new(),
            questions_answers: String::new(),
            user_input: String::new(),
        }
    }
}

impl std::fmt::Debug for FormValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormValues")
            .field("ai", &self.ai)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("temperature", &self.temperature)
            .field("instructions", &self.instructions)
            .field("context", &self.context)
            .field("accomplishments", &self.accomplishments)
            .field("goals", &self.goals)
            .field("questions_answers", &self.questions_answers)
            .field("user_input", &self.user_input)
            .finish()
    }
}

impl FormValues {
    /// Check the submit preconditions: a non-blank credential and a
    /// temperature inside [0, 1].
    pub fn validate(&self) -> Result<(), FormError> {
        if self.api_key.trim().is_empty() {
            return Err(FormError::MissingApiKey);
        }
        if !self.temperature.is_finite() || !(0.0..=1.0).contains(&self.temperature) {
            return Err(FormError::TemperatureOutOfRange(self.temperature));
        }
        Ok(())
    }

    /// Compose the labeled user prompt from the five text fields.
    pub fn user_prompt(&self) -> String {
        format!(
            "Instructions: {}\n\nContext: {}\n\nAccomplishments: {}\n\n\
             Performance Ratings and Questions:\n{}\n\nGoals: {}",
            self.instructions,
            self.context,
            self.accomplishments,
            self.questions_answers,
            self.goals,
        )
    }

    /// Messages for the first turn: the system prompt followed by the user prompt.
    pub fn initial_messages(&self) -> Vec<Message> {
        vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(self.user_prompt()),
        ]
    }

    /// Overlay the text fields present in a form file.
    pub fn apply_file(&mut self, file: FormFile) {
        let FormFile {
            ai,
            temperature,
            instructions,
            context,
            accomplishments,
            goals,
            questions_answers,
        } = file;

        if let Some(v) = ai {
            self.ai = v;
        }
        if let Some(v) = temperature {
            self.temperature = v;
        }
        if let Some(v) = instructions {
            self.instructions = v;
        }
        if let Some(v) = context {
            self.context = v;
        }
        if let Some(v) = accomplishments {
            self.accomplishments = v;
        }
        if let Some(v) = goals {
            self.goals = v;
        }
        if let Some(v) = questions_answers {
            self.questions_answers = v;
        }
    }
}

// ─────────────────────────────────────────────
// Form file
// ─────────────────────────────────────────────

/// Prepared answers loaded from JSON, so multi-line fields can be written
/// in an editor. The credential is deliberately not part of this file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FormFile {
    pub ai: Option<String>,
    pub temperature: Option<f64>,
    pub instructions: Option<String>,
    pub context: Option<String>,
    pub accomplishments: Option<String>,
    pub goals: Option<String>,
    #[serde(alias = "questionsAnswers")]
    pub questions_answers: Option<String>,
}

impl FormFile {
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let content = std::fs::read_to_string(path).map_err(|source| FormError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let file: FormFile = serde_json::from_str(&content).map_err(|source| FormError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded form file from {}", path.display());
        Ok(file)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
