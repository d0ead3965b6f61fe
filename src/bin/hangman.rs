use anyhow::Context;
use clap::Parser;
use console_suite::utils::{init_from_config, Config, Console};
use console_suite::HangmanSession;
use std::path::PathBuf;
use tracing::info;

/// Guess the hidden word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// TOML config file (defaults to $CONFIG_FILE, then built-in settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wrong guesses allowed before the round is lost
    #[arg(long)]
    max_wrong: Option<usize>,

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
    if let Some(max_wrong) = args.max_wrong {
        config.hangman.max_wrong_guesses = max_wrong;
    }

    init_from_config(&config.logging)?;
    info!(
        words = config.hangman.words.len(),
        max_wrong = config.hangman.max_wrong_guesses,
        "starting hangman"
    );

    HangmanSession::new(
        Console::stdio(),
        rand::thread_rng(),
        config.hangman.words,
        config.hangman.max_wrong_guesses,
    )
    .run()
    .context("Console I/O failed")?;

    Ok(())
}
