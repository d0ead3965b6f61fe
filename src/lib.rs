pub mod chat;
pub mod hangman;
pub mod portfolio;
pub mod utils;

// Re-export commonly used types
pub use chat::{ChatSession, Responder};
pub use hangman::{Game, GuessError, HangmanSession, Status};
pub use portfolio::{
    Action, Holding, Ledger, PortfolioConsole, PortfolioError, PriceTable, Summary, Transaction,
    Valuation,
};
pub use utils::{Config, Console};
