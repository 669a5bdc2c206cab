//! Integration tests for the stat-card CLI and font wiring.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use stat_card::cli::{Cli, Commands, LogLevelArg, commands};
use stat_card::config::Config;
use stat_card::fonts;
use stat_card_fonts::loader::http::{FetchError, FetchResponse, FontEndpoint};
use stat_card_fonts::{BundleWriter, FontCache};
use tempfile::TempDir;
use url::Url;

/// Endpoint answering every request with the same status or bundle.
struct FixedEndpoint {
    status: Option<u16>,
}

impl FontEndpoint for FixedEndpoint {
    fn fetch(&self, _url: &Url) -> Result<FetchResponse, FetchError> {
        if let Some(status) = self.status {
            return Ok(FetchResponse::Status(status));
        }
        let mut writer = BundleWriter::new();
        writer.push("zh-CN", b"not really a font").unwrap();
        Ok(FetchResponse::Bundle(writer.finish()))
    }
}

fn run_to_string(command: Commands, config: &Config) -> String {
    let mut out = Vec::new();
    commands::run(command, config, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn test_parse_fetch_command() {
    let cli = Cli::try_parse_from([
        "stat-card",
        "fetch",
        "--langs",
        "zh-CN|unknown",
        "--text",
        "你好",
        "--json",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(cli.log_level, Some(LogLevelArg::Debug));
    assert_eq!(
        cli.command,
        Commands::Fetch {
            langs: "zh-CN|unknown".to_string(),
            text: "你好".to_string(),
            host: None,
            json: true,
            strict: false,
        }
    );
}

#[test]
fn test_parse_rejects_bad_pack_entry() {
    assert!(Cli::try_parse_from(["stat-card", "pack", "-o", "out.bin", "zh-CN"]).is_err());
    assert!(Cli::try_parse_from(["stat-card", "pack", "-o", "out.bin"]).is_err());
}

#[test]
fn test_pack_then_decode() {
    let dir = TempDir::new().unwrap();
    let cjk = dir.path().join("cjk.otf");
    let fallback = dir.path().join("fallback.ttf");
    std::fs::write(&cjk, [1u8, 2, 3, 4]).unwrap();
    std::fs::write(&fallback, [5u8, 6]).unwrap();
    let bundle_path = dir.path().join("bundle.bin");

    let config = Config::default();
    let output = run_to_string(
        Commands::Pack {
            out: bundle_path.clone(),
            entries: vec![
                ("zh-CN".to_string(), cjk),
                ("unknown".to_string(), fallback),
            ],
        },
        &config,
    );
    assert!(output.starts_with("wrote 2 record(s)"));

    let bundle = commands::decode_file(&bundle_path, "你好").unwrap();
    assert_eq!(bundle.len(), 2);
    assert_eq!(bundle.records()[0].language_code.as_deref(), Some("zh-CN"));
    assert_eq!(bundle.records()[0].name, "stat_card_zh-CN_fallback_你好");
    assert_eq!(&*bundle.records()[0].data, &[1, 2, 3, 4]);
    assert_eq!(bundle.records()[1].language_code, None);

    let json = run_to_string(
        Commands::Decode {
            file: bundle_path,
            text: "你好".to_string(),
            json: true,
        },
        &config,
    );
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    assert_eq!(parsed[0]["language_code"], "zh-CN");
    assert_eq!(parsed[0]["bytes"], 4);
    assert_eq!(parsed[0]["loadable"], false);
    assert_eq!(parsed[1]["language_code"], serde_json::Value::Null);
}

#[test]
fn test_decode_truncated_file_reports_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.bin");
    // Code length 5 with only two code bytes present.
    std::fs::write(&path, [5u8, b'j', b'a']).unwrap();

    let err = commands::decode_file(&path, "x").unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("broken.bin"), "{message}");
    assert!(message.contains("Malformed font bundle"), "{message}");
}

#[test]
fn test_decode_missing_file() {
    let err = commands::decode_file(&PathBuf::from("/nonexistent/bundle.bin"), "").unwrap_err();
    assert!(format!("{err:#}").contains("Failed to read bundle"));
}

#[test]
fn test_families_uses_config_overrides() {
    let mut config = Config::default();
    config
        .language_fonts
        .insert("ja-JP".to_string(), vec!["M PLUS 1p".to_string()]);

    let output = run_to_string(
        Commands::Families {
            codes: vec![
                "ja-JP".to_string(),
                "unknown".to_string(),
                "xx-XX".to_string(),
            ],
        },
        &config,
    );
    assert_eq!(
        output,
        "ja-JP: M PLUS 1p\nunknown: Noto Sans\nxx-XX: (none)\n"
    );
}

#[tokio::test]
async fn test_fetch_through_resolver() {
    let config = Config::default();
    let loader = fonts::build_loader_with(
        &config,
        Arc::new(FixedEndpoint { status: None }),
        Arc::new(FontCache::new()),
    );

    let bundle = commands::fetch(&loader, &config.font_host, "zh-CN", "你好", false)
        .await
        .unwrap();
    assert_eq!(bundle.len(), 1);
    assert_eq!(bundle.records()[0].name, "stat_card_zh-CN_fallback_你好");
    assert_eq!(loader.cache().len(), 1);
}

#[tokio::test]
async fn test_fetch_strict_surfaces_no_coverage() {
    let config = Config::default();
    let loader = fonts::build_loader_with(
        &config,
        Arc::new(FixedEndpoint { status: Some(404) }),
        Arc::new(FontCache::new()),
    );

    let lenient = commands::fetch(&loader, &config.font_host, "zh-CN", "你好", false)
        .await
        .unwrap();
    assert!(lenient.is_empty());

    let err = commands::fetch(&loader, &config.font_host, "zh-CN", "你好", true)
        .await
        .unwrap_err();
    assert!(format!("{err:#}").contains("status 404"));
}

#[test]
fn test_print_bundle_empty() {
    let mut out = Vec::new();
    commands::print_bundle(&mut out, &stat_card_fonts::FontBundle::empty(), false).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "no fonts\n");
}
