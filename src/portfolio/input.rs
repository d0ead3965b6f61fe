//! Turns raw console text into values the ledger accepts.
//!
//! Parsing (is this text a number?) and validation (is it a usable share
//! count?) are separate steps with separate error reasons.

use crate::portfolio::error::{PortfolioError, QuantityProblem, Result};
use std::num::{IntErrorKind, ParseIntError};

/// What the user typed at a symbol prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolInput {
    /// Leave the current prompt
    Back,
    Symbol(String),
}

/// Normalize a symbol prompt answer. Blank input and `back` both leave.
pub fn parse_symbol(text: &str) -> SymbolInput {
    let symbol = text.trim().to_uppercase();
    if symbol.is_empty() || symbol == "BACK" {
        SymbolInput::Back
    } else {
        SymbolInput::Symbol(symbol)
    }
}

/// Parse a share count. Must be a whole number greater than zero.
pub fn parse_quantity(text: &str) -> Result<u64> {
    let trimmed = text.trim();

    let value: i128 = trimmed.parse().map_err(|e: ParseIntError| {
        let reason = match e.kind() {
            IntErrorKind::PosOverflow => QuantityProblem::TooLarge,
            IntErrorKind::NegOverflow => QuantityProblem::NotPositive,
            _ => QuantityProblem::NotANumber,
        };
        PortfolioError::InvalidQuantity {
            input: trimmed.to_string(),
            reason,
        }
    })?;

    if value <= 0 {
        return Err(PortfolioError::not_positive(value));
    }

    u64::try_from(value).map_err(|_| PortfolioError::InvalidQuantity {
        input: trimmed.to_string(),
        reason: QuantityProblem::TooLarge,
    })
}
