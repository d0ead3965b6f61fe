use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while working with the portfolio.
///
/// None of these are fatal: the menu loop reports the message and re-prompts.
#[derive(Debug, Error)]
pub enum PortfolioError {
    #[error("Invalid stock symbol '{0}'! Please choose from the available stocks.")]
    InvalidSymbol(String),

    #[error("Invalid quantity '{input}': {reason}")]
    InvalidQuantity { input: String, reason: QuantityProblem },

    #[error("You don't own any shares of {0}!")]
    NotHeld(String),

    #[error("Cannot sell {requested} shares of {symbol}: only {held} held")]
    InsufficientShares {
        symbol: String,
        requested: u64,
        held: u64,
    },

    #[error("Failed to write {}: {source}", path.display())]
    ExportIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a quantity was rejected. Malformed text and a bad share count are
/// reported differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityProblem {
    NotANumber,
    NotPositive,
    TooLarge,
}

impl std::fmt::Display for QuantityProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuantityProblem::NotANumber => write!(f, "please enter a valid number"),
            QuantityProblem::NotPositive => write!(f, "please enter a positive number of shares"),
            QuantityProblem::TooLarge => write!(f, "that many shares cannot be held"),
        }
    }
}

impl PortfolioError {
    pub(crate) fn not_positive(quantity: impl ToString) -> Self {
        PortfolioError::InvalidQuantity {
            input: quantity.to_string(),
            reason: QuantityProblem::NotPositive,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;
