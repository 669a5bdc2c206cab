//! stat-card: profile statistics cards with on-demand multilingual fonts.
//!
//! The card layout engine lives outside this workspace. This crate wires the
//! font side of it together: configuration, the shared font loader, the
//! resolver the layout engine calls for glyph coverage gaps, and a CLI for
//! exercising all of it against a live font endpoint.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod fonts;

pub use stat_card_config as config;
