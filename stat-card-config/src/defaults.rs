//! Default value functions for configuration.
//!
//! Used as `#[serde(default = "crate::defaults::...")]` attributes on
//! `Config` fields.

use std::collections::BTreeMap;

pub fn font_host() -> String {
    "http://localhost:3000".to_string()
}

pub fn fetch_timeout_secs() -> u64 {
    10
}

pub fn max_bundle_bytes() -> u64 {
    20 * 1024 * 1024 // 20 MB
}

pub fn user_agent() -> String {
    "stat-card".to_string()
}

pub fn language_fonts() -> BTreeMap<String, Vec<String>> {
    BTreeMap::new() // Built-in map only
}

pub fn log_level() -> crate::types::LogLevel {
    crate::types::LogLevel::Warn
}
