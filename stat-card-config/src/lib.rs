//! Configuration system for stat-card rendering.
//!
//! This crate provides configuration loading, saving, and default values:
//!
//! - Font endpoint settings (host, timeout, response size cap)
//! - Language-to-font-family overrides merged over the built-in map
//! - Log level for the binary's log bridge

pub mod config;
pub mod defaults;
pub mod error;
mod types;

// Re-export main types for convenience
pub use config::{Config, FONT_HOST_ENV};
pub use error::ConfigError;
pub use types::LogLevel;
