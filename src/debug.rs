//! Log bridge for the stat-card binary.
//!
//! Routes every `log::info!()` etc. from stat-card and its sub-crates to
//! stderr, one timestamped line per record:
//!
//! ```text
//! [1729321200.123456] [WARN ] [stat_card_fonts::loader] Font fetch failed ...
//! ```
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config
//! file's `log_level`.
use parking_lot::Mutex;
use std::io::Write;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{LevelFilter, Log, Metadata, Record};

/// `log` implementation writing formatted lines to a shared writer.
pub struct LogBridge {
    level: LevelFilter,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl LogBridge {
    pub fn new(level: LevelFilter, writer: Box<dyn Write + Send>) -> Self {
        Self {
            level,
            writer: Mutex::new(writer),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_line(&get_timestamp(), record);
        let mut writer = self.writer.lock();
        // Logging must never take the process down.
        let _ = writer.write_all(line.as_bytes());
    }

    fn flush(&self) {
        let _ = self.writer.lock().flush();
    }
}

fn format_line(timestamp: &str, record: &Record<'_>) -> String {
    format!(
        "[{}] [{:<5}] [{}] {}\n",
        timestamp,
        record.level(),
        record.target(),
        record.args()
    )
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Pick the effective level from the CLI flag, `RUST_LOG`, and the config.
///
/// `RUST_LOG` is honoured when it is a bare level (`debug`, `warn`, ...);
/// per-module directives are not supported and fall through to the config.
pub fn resolve_level(
    cli_level: Option<LevelFilter>,
    rust_log: Option<&str>,
    config_level: LevelFilter,
) -> LevelFilter {
    if let Some(level) = cli_level {
        return level;
    }
    rust_log
        .and_then(|value| LevelFilter::from_str(value.trim()).ok())
        .unwrap_or(config_level)
}

static LOG_BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the log bridge as the global logger.
///
/// Only the first call builds and installs the bridge; later calls keep it and
/// return the level it was installed with.
pub fn init_log_bridge(cli_level: Option<LevelFilter>, config_level: LevelFilter) -> LevelFilter {
    let mut created = false;
    let bridge = LOG_BRIDGE.get_or_init(|| {
        created = true;
        let rust_log = std::env::var("RUST_LOG").ok();
        let level = resolve_level(cli_level, rust_log.as_deref(), config_level);
        LogBridge::new(level, Box::new(std::io::stderr()))
    });

    if created && log::set_logger(bridge).is_ok() {
        log::set_max_level(bridge.level());
    }
    bridge.level()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Writer handing its bytes to a shared buffer.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_cli_level_wins() {
        assert_eq!(
            resolve_level(Some(LevelFilter::Trace), Some("error"), LevelFilter::Warn),
            LevelFilter::Trace
        );
    }

    #[test]
    fn test_rust_log_beats_config() {
        assert_eq!(
            resolve_level(None, Some(" Debug "), LevelFilter::Warn),
            LevelFilter::Debug
        );
    }

    #[test]
    fn test_module_directives_fall_back_to_config() {
        assert_eq!(
            resolve_level(None, Some("stat_card_fonts=debug"), LevelFilter::Info),
            LevelFilter::Info
        );
        assert_eq!(resolve_level(None, None, LevelFilter::Off), LevelFilter::Off);
    }

    #[test]
    fn test_init_installs_bridge_once() {
        let first = init_log_bridge(Some(LevelFilter::Info), LevelFilter::Warn);
        assert_eq!(first, LevelFilter::Info);

        let bridge = LOG_BRIDGE.get().map(|b| b as *const LogBridge);
        let second = init_log_bridge(Some(LevelFilter::Trace), LevelFilter::Off);
        assert_eq!(second, LevelFilter::Info);
        assert_eq!(LOG_BRIDGE.get().map(|b| b as *const LogBridge), bridge);
        assert_eq!(log::max_level(), LevelFilter::Info);
    }

    #[test]
    fn test_bridge_filters_and_formats() {
        let buf = SharedBuf::default();
        let bridge = LogBridge::new(LevelFilter::Info, Box::new(buf.clone()));

        bridge.log(
            &Record::builder()
                .level(log::Level::Debug)
                .target("stat_card")
                .args(format_args!("hidden"))
                .build(),
        );
        bridge.log(
            &Record::builder()
                .level(log::Level::Warn)
                .target("stat_card_fonts::loader")
                .args(format_args!("Font fetch failed"))
                .build(),
        );

        let output = String::from_utf8(buf.0.lock().clone()).unwrap();
        assert!(!output.contains("hidden"));
        assert!(output.contains("[WARN ] [stat_card_fonts::loader] Font fetch failed\n"));
        assert_eq!(output.lines().count(), 1);
    }
}
