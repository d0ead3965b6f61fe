pub mod art;
pub mod console;
pub mod game;

pub use console::HangmanSession;
pub use game::{Game, GuessError, GuessOutcome, Status, DEFAULT_MAX_WRONG_GUESSES};

pub const DEFAULT_WORDS: [&str; 5] = ["python", "programming", "computer", "keyboard", "monitor"];
