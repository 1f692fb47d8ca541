//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use selfreview_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Provider: {}", cfg.defaults.ai);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, save_config, ConfigError};
pub use schema::{Config, ProviderConfig};
