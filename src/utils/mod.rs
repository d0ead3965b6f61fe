pub mod config;
pub mod console;
pub mod logger;

pub use config::Config;
pub use console::Console;
pub use logger::{init_from_config, init_logger};
