pub mod console;
pub mod error;
pub mod export;
pub mod input;
pub mod ledger;
pub mod prices;

pub use console::PortfolioConsole;
pub use error::{PortfolioError, QuantityProblem};
pub use export::{export_valuation, read_csv, ExportReport};
pub use input::{parse_quantity, parse_symbol, SymbolInput};
pub use ledger::{Action, Holding, Ledger, Summary, Transaction, Valuation};
pub use prices::{Listing, PriceTable};

use rust_decimal::{Decimal, RoundingStrategy};

/// Dollar amount with exactly two decimals, no currency sign
pub fn money(amount: Decimal) -> String {
    fixed(amount, 2)
}

/// Percentage rounded to `dp` decimals, without the `%` sign
pub fn percent(value: Decimal, dp: u32) -> String {
    fixed(value, dp)
}

// Decimal's `{:.N}` truncates, so round first
fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
    format!("{:.*}", dp as usize, rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money() {
        assert_eq!(money(dec!(1805)), "1805.00");
        assert_eq!(money(dec!(43.25)), "43.25");
        assert_eq!(money(dec!(-12.5)), "-12.50");
        assert_eq!(money(dec!(12.349)), "12.35");
    }

    #[test]
    fn test_percent_rounds() {
        assert_eq!(percent(dec!(67.66), 1), "67.7");
        assert_eq!(percent(dec!(80.67039106), 1), "80.7");
        assert_eq!(percent(dec!(19.32960893), 1), "19.3");
        assert_eq!(percent(dec!(100), 1), "100.0");
        assert_eq!(percent(dec!(-3.456), 2), "-3.46");
    }
}
