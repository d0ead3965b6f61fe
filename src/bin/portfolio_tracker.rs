use anyhow::Context;
use clap::Parser;
use console_suite::utils::{init_from_config, Config, Console};
use console_suite::{Ledger, PortfolioConsole, PriceTable};
use std::path::PathBuf;
use tracing::info;

/// Track stock positions against a fixed price table
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (defaults to $CONFIG_FILE, then built-in settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for CSV/TXT exports
    #[arg(long)]
    export_dir: Option<PathBuf>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    if let Some(dir) = args.export_dir {
        config.portfolio.export_dir = dir;
    }

    init_from_config(&config.logging)?;
    info!(export_dir = %config.portfolio.export_dir.display(), "starting portfolio tracker");

    let mut ledger = Ledger::new(PriceTable::standard());
    PortfolioConsole::new(&mut ledger, Console::stdio(), config.portfolio.export_dir)
        .run()
        .context("Console I/O failed")?;

    info!(transactions = ledger.history().len(), "portfolio tracker finished");
    Ok(())
}
