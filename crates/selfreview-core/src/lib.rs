//! Core building blocks for Selfreview.
//!
//! - [`types`] — provider-agnostic chat messages
//! - [`form`] — the self-review form and prompt assembly
//! - [`transcript`] — the in-memory conversation and its text export
//! - [`config`] — `~/.selfreview/config.json` schema, loader, env overrides
//! - [`utils`] — path helpers

pub mod config;
pub mod form;
pub mod transcript;
pub mod types;
pub mod utils;

pub use form::{FormError, FormValues, SYSTEM_PROMPT};
pub use transcript::{Transcript, EXPORT_FILENAME};
pub use types::{Message, Role};
