//! Form/conversation controller.
//!
//! Three observable phases:
//!
//! ```text
//! Idle --submit--> Loading --reply--> Conversing
//! Conversing --continue (non-blank)--> Loading --reply--> Conversing
//! Conversing --clear--> Idle
//! ```
//!
//! Every call into the backend takes `&mut self` across the await, so a
//! second request can't start while one is in flight.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use selfreview_core::form::{FormError, FormValues};
use selfreview_core::transcript::Transcript;
use selfreview_providers::ChatBackend;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No transcript; the form can be submitted.
    Idle,
    /// A request is in flight.
    Loading,
    /// A transcript exists; only continuation turns are accepted.
    Conversing,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Form(#[from] FormError),

    #[error("a conversation is already in progress; clear it before submitting again")]
    AlreadyConversing,

    #[error("no conversation yet; submit the form first")]
    NotConversing,

    #[error("nothing to download yet")]
    EmptyTranscript,

    #[error("failed to write transcript: {0}")]
    Export(#[from] std::io::Error),
}

pub struct Conversation<B> {
    backend: B,
    form: FormValues,
    transcript: Transcript,
    phase: Phase,
}

impl<B: ChatBackend> Conversation<B> {
    pub fn new(backend: B, form: FormValues) -> Self {
        Self {
            backend,
            form,
            transcript: Transcript::new(),
            phase: Phase::Idle,
        }
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut FormValues {
        &mut self.form
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Submit the form: seed the transcript with the composed prompt and the reply.
    ///
    /// Returns the assistant entry as stored (an `"Error: ..."` reply included).
    pub async fn submit(&mut self) -> Result<String, ControllerError> {
        if !self.transcript.is_empty() {
            return Err(ControllerError::AlreadyConversing);
        }
        self.form.validate()?;

        let messages = self.form.initial_messages();
        let prompt = messages
            .iter()
            .find(|m| !m.is_system())
            .map(|m| m.content.clone())
            .unwrap_or_default();

        info!(provider = %self.form.ai, temperature = self.form.temperature, "Submitting self-review form");
        self.phase = Phase::Loading;

        let reply = self
            .backend
            .get_ai_response(&self.form.ai, &self.form.api_key, self.form.temperature, &messages)
            .await;

        self.transcript.seed(prompt, reply);
        self.phase = Phase::Conversing;
        Ok(self.last_reply())
    }

    /// Send the scratch input as the next user turn.
    ///
    /// Blank input is a no-op (`Ok(None)`): no request, no transcript change.
    pub async fn continue_conversation(&mut self) -> Result<Option<String>, ControllerError> {
        if self.form.user_input.trim().is_empty() {
            return Ok(None);
        }
        if self.transcript.is_empty() {
            return Err(ControllerError::NotConversing);
        }

        let input = std::mem::take(&mut self.form.user_input);
        self.transcript.push_user(input);
        self.phase = Phase::Loading;

        debug!(
            provider = %self.form.ai,
            messages = self.transcript.len(),
            "Sending continuation turn"
        );

        let reply = self
            .backend
            .get_ai_response(
                &self.form.ai,
                &self.form.api_key,
                self.form.temperature,
                self.transcript.messages(),
            )
            .await;

        self.transcript.push_assistant(reply);
        self.phase = Phase::Conversing;
        Ok(Some(self.last_reply()))
    }

    /// Drop the transcript and return to Idle; form values are kept.
    pub fn clear(&mut self) {
        self.transcript.clear();
        self.phase = Phase::Idle;
        debug!("Transcript cleared");
    }

    /// Export the transcript into `dir`.
    pub fn download(&self, dir: &Path) -> Result<PathBuf, ControllerError> {
        if self.transcript.is_empty() {
            return Err(ControllerError::EmptyTranscript);
        }
        Ok(self.transcript.save_to(dir)?)
    }

    fn last_reply(&self) -> String {
        self.transcript
            .last()
            .map(|m| m.content.clone())
            .unwrap_or_default()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
