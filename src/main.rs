use anyhow::Result;
use clap::Parser;
use stat_card::cli::{Cli, commands};
use stat_card::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config is loaded before logging so its log_level can take part in level
    // resolution. Config's own load messages are dropped.
    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("stat-card: error: {e:#}");
            std::process::exit(2);
        }
    };

    stat_card::debug::init_log_bridge(
        cli.log_level.map(|level| level.to_level_filter()),
        config.log_level.to_level_filter(),
    );
    log::info!("stat-card {} starting", stat_card::VERSION);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = commands::run(cli.command, &config, &mut out);
    log::logger().flush();

    if let Err(ref e) = result {
        eprintln!("stat-card: error: {e:#}");
    }
    result
}
