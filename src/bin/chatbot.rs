use anyhow::Context;
use clap::Parser;
use console_suite::utils::{init_from_config, Config, Console};
use console_suite::{ChatSession, Responder};
use std::path::PathBuf;
use tracing::info;

/// Chat with a small pattern-matching bot
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (defaults to $CONFIG_FILE, then built-in settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bot name shown in replies
    #[arg(long)]
    name: Option<String>,

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
    if let Some(name) = args.name {
        config.chat.bot_name = name;
    }

    init_from_config(&config.logging)?;

    let responder =
        Responder::new(&config.chat.bot_name).context("Failed to build response table")?;
    info!(name = responder.name(), "starting chatbot");

    ChatSession::new(&responder, Console::stdio(), rand::thread_rng())
        .run()
        .context("Console I/O failed")?;

    Ok(())
}
