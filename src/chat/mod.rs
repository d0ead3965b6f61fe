pub mod console;
pub mod responder;

pub use console::{ChatSession, DEMO_INPUTS};
pub use responder::{Responder, Rule};

pub const DEFAULT_BOT_NAME: &str = "CodeBot";
