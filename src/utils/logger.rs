use anyhow::{anyhow, Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging system.
///
/// `RUST_LOG` overrides `level`. Without a log file, events go to stderr so
/// they never interleave with the interactive prompts on stdout.
pub fn init_logger(level: &str, json_output: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);

    let result = match (json_output, log_file) {
        (true, Some(path)) => registry
            .with(fmt::layer().json().with_writer(open_log_file(path)?))
            .try_init(),
        (false, Some(path)) => registry
            .with(fmt::layer().with_ansi(false).with_writer(open_log_file(path)?))
            .try_init(),
        (true, None) => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        (false, None) => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| anyhow!("Failed to install log subscriber: {e}"))
}

fn open_log_file(path: &Path) -> Result<Mutex<File>> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map(Mutex::new)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

/// Initialize logger from config
pub fn init_from_config(config: &crate::utils::config::LoggingConfig) -> Result<()> {
    let json = config.output == "json";
    let log_file = if !config.file_path.is_empty() {
        Some(Path::new(&config.file_path))
    } else {
        None
    };

    init_logger(&config.level, json, log_file)
}
