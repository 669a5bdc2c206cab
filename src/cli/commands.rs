//! CLI command implementations.
//!
//! Commands write their report to the supplied writer so they can be driven
//! from tests as well as from `main`.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use stat_card_config::Config;
use stat_card_fonts::{AdditionalAssetResolver, BundleWriter, FontBundle, FontLoader, decode};

use super::Commands;
use crate::fonts;

/// Printable view of one decoded font record.
#[derive(Debug, Serialize)]
pub struct RecordSummary<'a> {
    pub name: &'a str,
    pub language_code: Option<&'a str>,
    pub weight: u16,
    pub style: &'static str,
    pub bytes: usize,
    /// Whether the data parses as a TTF/OTF face
    pub loadable: bool,
}

/// Summaries for every record of `bundle`, in bundle order.
pub fn summarize(bundle: &FontBundle) -> Vec<RecordSummary<'_>> {
    bundle
        .iter()
        .map(|record| RecordSummary {
            name: &record.name,
            language_code: record.language_code.as_deref(),
            weight: record.weight,
            style: record.style.as_str(),
            bytes: record.data.len(),
            loadable: record.face().is_some(),
        })
        .collect()
}

/// Write `bundle` as a table or as JSON.
pub fn print_bundle(out: &mut dyn Write, bundle: &FontBundle, json: bool) -> Result<()> {
    let summaries = summarize(bundle);
    if json {
        serde_json::to_writer_pretty(&mut *out, &summaries)?;
        writeln!(out)?;
        return Ok(());
    }

    if summaries.is_empty() {
        writeln!(out, "no fonts")?;
        return Ok(());
    }
    for summary in &summaries {
        writeln!(
            out,
            "{:<12} {:>9} bytes  {} {}  {}{}",
            summary.language_code.unwrap_or("(any)"),
            summary.bytes,
            summary.weight,
            summary.style,
            summary.name,
            if summary.loadable { "" } else { "  [not a font]" }
        )?;
    }
    Ok(())
}

/// Run a parsed command.
pub fn run(command: Commands, config: &Config, out: &mut dyn Write) -> Result<()> {
    match command {
        Commands::Fetch {
            langs,
            text,
            host,
            json,
            strict,
        } => {
            let host = host.unwrap_or_else(|| config.font_host.clone());
            let loader = fonts::build_loader(config);
            let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
            let bundle = runtime.block_on(fetch(&loader, &host, &langs, &text, strict))?;
            print_bundle(out, &bundle, json)
        }
        Commands::Decode { file, text, json } => {
            let bundle = decode_file(&file, &text)?;
            print_bundle(out, &bundle, json)
        }
        Commands::Pack { out: path, entries } => {
            let written = pack_files(&path, &entries)?;
            writeln!(out, "wrote {} record(s) to {}", written, path.display())?;
            Ok(())
        }
        Commands::Families { codes } => print_families(out, config, &codes),
    }
}

/// Load fonts through the render resolver, or directly when `strict`.
pub async fn fetch(
    loader: &Arc<FontLoader>,
    host: &str,
    langs: &str,
    text: &str,
    strict: bool,
) -> Result<FontBundle> {
    if strict {
        return loader
            .try_load(host, langs, text)
            .await
            .with_context(|| format!("Failed to load fonts for '{text}' ({langs})"));
    }
    let resolver = fonts::resolver_for(host, loader);
    Ok(resolver.resolve(langs, text).await)
}

/// Decode a bundle file from disk.
pub fn decode_file(path: &Path, text: &str) -> Result<FontBundle> {
    let buffer =
        std::fs::read(path).with_context(|| format!("Failed to read bundle {}", path.display()))?;
    decode(&buffer, text).with_context(|| format!("Malformed font bundle {}", path.display()))
}

/// Write a bundle file from `(code, font file)` pairs. Returns the record count.
pub fn pack_files(out: &Path, entries: &[(String, std::path::PathBuf)]) -> Result<usize> {
    let mut writer = BundleWriter::new();
    for (code, font_path) in entries {
        let data = std::fs::read(font_path)
            .with_context(|| format!("Failed to read font {}", font_path.display()))?;
        writer
            .push(code, &data)
            .with_context(|| format!("Cannot bundle {} as '{code}'", font_path.display()))?;
        log::debug!("Packed {} ({} bytes) as '{}'", font_path.display(), data.len(), code);
    }

    let count = writer.record_count();
    std::fs::write(out, writer.finish())
        .with_context(|| format!("Failed to write bundle {}", out.display()))?;
    Ok(count)
}

fn print_families(out: &mut dyn Write, config: &Config, codes: &[String]) -> Result<()> {
    let map = fonts::language_map(config);
    let codes: Vec<&str> = if codes.is_empty() {
        map.codes()
    } else {
        codes.iter().map(String::as_str).collect()
    };

    for code in codes {
        let families = map.families_for(code);
        if families.is_empty() {
            writeln!(out, "{code}: (none)")?;
        } else {
            writeln!(out, "{code}: {}", families.join(", "))?;
        }
    }
    Ok(())
}
