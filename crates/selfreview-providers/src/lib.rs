//! Provider layer for Selfreview.
//!
//! Translates a provider-agnostic message list into one of three vendor
//! request shapes and back into plain text.
//!
//! # Architecture
//!
//! - [`registry`] — closed [`ProviderKind`] union + static specs (model, endpoint, env var)
//! - [`gemini`], [`openai`], [`claude`] — one HTTP client per vendor
//! - [`adapter::ProviderAdapter`] — dispatch by kind; failures become `"Error: ..."` replies
//! - [`traits::ChatBackend`] — seam used by the conversation controller

pub mod adapter;
pub mod claude;
pub mod error;
pub mod gemini;
mod http;
pub mod openai;
pub mod registry;
pub mod traits;

pub use adapter::ProviderAdapter;
pub use error::ProviderError;
pub use registry::{find_by_name, ProviderKind, ProviderSpec, PROVIDERS};
pub use traits::ChatBackend;
