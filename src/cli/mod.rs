//! Command-line interface for stat-card.
//!
//! This module handles CLI argument parsing. Command implementations live in
//! the [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// stat-card - profile statistics cards with on-demand multilingual fonts
#[derive(Parser, Debug)]
#[command(name = "stat-card")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file to use instead of ~/.config/stat-card/config.yaml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set log level (overrides config and RUST_LOG)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Load fonts for a text segment from the font endpoint
    Fetch {
        /// Language codes, joined with '|' (e.g. "zh-CN|unknown")
        #[arg(long, value_name = "CODES")]
        langs: String,

        /// Exact text segment the fonts must cover
        #[arg(long, value_name = "TEXT")]
        text: String,

        /// Font host (scheme + host), overrides the config's font_host
        #[arg(long, value_name = "URL")]
        host: Option<String>,

        /// Print records as JSON
        #[arg(long)]
        json: bool,

        /// Fail instead of falling back to an empty result
        #[arg(long)]
        strict: bool,
    },

    /// Decode a font bundle file and list its records
    Decode {
        /// Bundle file to decode
        file: PathBuf,

        /// Text segment used to name the records
        #[arg(long, default_value = "")]
        text: String,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Package font files into a bundle file
    Pack {
        /// Output bundle file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Records to write, as CODE=FONT_FILE (use "unknown" for any language)
        #[arg(required = true, value_name = "CODE=FONT_FILE", value_parser = parse_pack_entry)]
        entries: Vec<(String, PathBuf)>,
    },

    /// Show the font families configured for language codes
    Families {
        /// Language codes to look up; all known codes when omitted
        codes: Vec<String>,
    },
}

/// Parse a `CODE=FONT_FILE` pack entry.
fn parse_pack_entry(value: &str) -> Result<(String, PathBuf), String> {
    let (code, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=FONT_FILE, got '{value}'"))?;
    if code.is_empty() || path.is_empty() {
        return Err(format!("expected CODE=FONT_FILE, got '{value}'"));
    }
    Ok((code.to_string(), PathBuf::from(path)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pack_entry() {
        assert_eq!(
            parse_pack_entry("zh-CN=fonts/NotoSansSC.otf"),
            Ok(("zh-CN".to_string(), PathBuf::from("fonts/NotoSansSC.otf")))
        );
        assert!(parse_pack_entry("zh-CN").is_err());
        assert!(parse_pack_entry("=font.ttf").is_err());
        assert!(parse_pack_entry("en=").is_err());
    }

    #[test]
    fn test_clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
