use crate::portfolio::error::{PortfolioError, QuantityProblem, Result};
use crate::portfolio::prices::PriceTable;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, info};

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Buy,
    Sell,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Buy => f.pad("BUY"),
            Action::Sell => f.pad("SELL"),
        }
    }
}

/// One immutable entry in the transaction log
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub timestamp: DateTime<Local>,
    pub action: Action,
    pub symbol: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Market value of a single held symbol, serialized as one CSV export row
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: u64,
    pub unit_price: Decimal,
    pub total_value: Decimal,
}

/// Current value of every held position
#[derive(Debug, Clone, PartialEq)]
pub struct Valuation {
    pub holdings: Vec<Holding>,
    pub portfolio_total: Decimal,
}

impl Valuation {
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Percentage of the portfolio held in `symbol`.
    ///
    /// None when the symbol is not held or the portfolio is worth nothing.
    pub fn weight(&self, symbol: &str) -> Option<Decimal> {
        if self.portfolio_total.is_zero() {
            return None;
        }

        self.holdings
            .iter()
            .find(|h| h.symbol == symbol)
            .map(|h| h.total_value / self.portfolio_total * Decimal::ONE_HUNDRED)
    }

    /// Weight of every holding, in holding order. Empty when the total is zero.
    pub fn weights(&self) -> Vec<(&str, Decimal)> {
        if self.portfolio_total.is_zero() {
            return Vec::new();
        }

        self.holdings
            .iter()
            .map(|h| {
                (
                    h.symbol.as_str(),
                    h.total_value / self.portfolio_total * Decimal::ONE_HUNDRED,
                )
            })
            .collect()
    }
}

/// Aggregate investment figures derived from the transaction log.
///
/// `net_invested` is portfolio-wide (bought minus sold), not a per-symbol
/// cost basis.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub holdings: usize,
    pub total_invested: Decimal,
    pub total_sold: Decimal,
    pub net_invested: Decimal,
    pub current_value: Decimal,
    pub unrealized_gain: Decimal,
    /// Percentage; None unless `net_invested > 0`
    pub roi: Option<Decimal>,
}

/// Position ledger: held quantities plus the append-only transaction log.
///
/// The position map is private; `buy` and `sell` are the only ways to change
/// it, so the log always replays to the current positions.
#[derive(Debug, Clone)]
pub struct Ledger {
    prices: PriceTable,
    positions: BTreeMap<String, u64>,
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new(prices: PriceTable) -> Self {
        Self {
            prices,
            positions: BTreeMap::new(),
            transactions: Vec::new(),
        }
    }

    /// Buy shares at the listed price
    pub fn buy(&mut self, symbol: &str, quantity: u64) -> Result<Transaction> {
        self.buy_at(symbol, quantity, Local::now())
    }

    /// Buy shares, stamping the transaction with `timestamp`
    pub fn buy_at(
        &mut self,
        symbol: &str,
        quantity: u64,
        timestamp: DateTime<Local>,
    ) -> Result<Transaction> {
        let unit_price = self.prices.price(symbol).ok_or_else(|| {
            debug!(symbol, "buy rejected: unknown symbol");
            PortfolioError::InvalidSymbol(symbol.to_string())
        })?;

        if quantity == 0 {
            debug!(symbol, "buy rejected: zero quantity");
            return Err(PortfolioError::not_positive(quantity));
        }

        let held = self.quantity(symbol);
        let new_quantity = held.checked_add(quantity).ok_or_else(|| {
            PortfolioError::InvalidQuantity {
                input: quantity.to_string(),
                reason: QuantityProblem::TooLarge,
            }
        })?;

        // All checks passed, nothing below can fail
        self.positions.insert(symbol.to_string(), new_quantity);
        let transaction = self.record(Action::Buy, symbol, quantity, unit_price, timestamp);

        info!(
            symbol,
            quantity,
            total = %transaction.total,
            holding = new_quantity,
            "bought shares"
        );

        Ok(transaction)
    }

    /// Sell shares at the listed price
    pub fn sell(&mut self, symbol: &str, quantity: u64) -> Result<Transaction> {
        self.sell_at(symbol, quantity, Local::now())
    }

    /// Sell shares, stamping the transaction with `timestamp`
    pub fn sell_at(
        &mut self,
        symbol: &str,
        quantity: u64,
        timestamp: DateTime<Local>,
    ) -> Result<Transaction> {
        let held = match self.positions.get(symbol) {
            Some(&held) => held,
            None => {
                debug!(symbol, "sell rejected: not held");
                return Err(PortfolioError::NotHeld(symbol.to_string()));
            }
        };

        if quantity == 0 {
            debug!(symbol, "sell rejected: zero quantity");
            return Err(PortfolioError::not_positive(quantity));
        }

        if quantity > held {
            debug!(symbol, quantity, held, "sell rejected: insufficient shares");
            return Err(PortfolioError::InsufficientShares {
                symbol: symbol.to_string(),
                requested: quantity,
                held,
            });
        }

        // Held symbols always come from the price table
        let unit_price = self
            .prices
            .price(symbol)
            .ok_or_else(|| PortfolioError::InvalidSymbol(symbol.to_string()))?;

        let remaining = held - quantity;
        if remaining == 0 {
            self.positions.remove(symbol);
        } else {
            self.positions.insert(symbol.to_string(), remaining);
        }

        let transaction = self.record(Action::Sell, symbol, quantity, unit_price, timestamp);

        info!(
            symbol,
            quantity,
            total = %transaction.total,
            holding = remaining,
            "sold shares"
        );

        Ok(transaction)
    }

    fn record(
        &mut self,
        action: Action,
        symbol: &str,
        quantity: u64,
        unit_price: Decimal,
        timestamp: DateTime<Local>,
    ) -> Transaction {
        let transaction = Transaction {
            timestamp,
            action,
            symbol: symbol.to_string(),
            quantity,
            unit_price,
            total: unit_price * Decimal::from(quantity),
        };
        self.transactions.push(transaction.clone());
        transaction
    }

    /// Value every held position at the listed price
    pub fn valuation(&self) -> Valuation {
        let holdings: Vec<Holding> = self
            .positions
            .iter()
            .filter_map(|(symbol, &quantity)| {
                let unit_price = self.prices.price(symbol)?;
                Some(Holding {
                    symbol: symbol.clone(),
                    quantity,
                    unit_price,
                    total_value: unit_price * Decimal::from(quantity),
                })
            })
            .collect();

        let portfolio_total = holdings.iter().map(|h| h.total_value).sum();

        Valuation {
            holdings,
            portfolio_total,
        }
    }

    /// Percentage of the portfolio held in `symbol`
    pub fn weight(&self, symbol: &str) -> Option<Decimal> {
        self.valuation().weight(symbol)
    }

    /// Investment totals and return on investment
    pub fn summary(&self) -> Summary {
        let total_for = |action: Action| -> Decimal {
            self.transactions
                .iter()
                .filter(|t| t.action == action)
                .map(|t| t.total)
                .sum()
        };

        let total_invested = total_for(Action::Buy);
        let total_sold = total_for(Action::Sell);
        let net_invested = total_invested - total_sold;
        let current_value = self.valuation().portfolio_total;
        let unrealized_gain = current_value - net_invested;

        let roi = if net_invested > Decimal::ZERO {
            Some(unrealized_gain / net_invested * Decimal::ONE_HUNDRED)
        } else {
            None
        };

        Summary {
            holdings: self.positions.len(),
            total_invested,
            total_sold,
            net_invested,
            current_value,
            unrealized_gain,
            roi,
        }
    }

    /// Transaction log in insertion order. Clone the iterator to walk it again.
    pub fn history(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    /// Shares currently held (0 when not held)
    pub fn quantity(&self, symbol: &str) -> u64 {
        self.positions.get(symbol).copied().unwrap_or(0)
    }

    /// Held symbols and quantities, in symbol order
    pub fn positions(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.positions.iter().map(|(s, &q)| (s.as_str(), q))
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(PriceTable::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_buy_then_top_up() {
        let mut ledger = Ledger::default();

        let first = ledger.buy("AAPL", 10).unwrap();
        assert_eq!(first.total, dec!(1805.00));
        assert_eq!(first.action, Action::Buy);
        assert_eq!(ledger.quantity("AAPL"), 10);

        ledger.buy("AAPL", 5).unwrap();
        assert_eq!(ledger.quantity("AAPL"), 15);
        assert_eq!(ledger.history().count(), 2);
        assert!(ledger.history().all(|t| t.action == Action::Buy));
    }

    #[test]
    fn test_oversell_leaves_state_unchanged() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 15).unwrap();

        let err = ledger.sell("AAPL", 20).unwrap_err();
        assert!(matches!(
            err,
            PortfolioError::InsufficientShares { requested: 20, held: 15, .. }
        ));
        assert_eq!(ledger.quantity("AAPL"), 15);
        assert_eq!(ledger.history().count(), 1);
    }

    #[test]
    fn test_sell_unheld_symbol() {
        let mut ledger = Ledger::default();

        let err = ledger.sell("TSLA", 1).unwrap_err();
        assert!(matches!(err, PortfolioError::NotHeld(ref s) if s == "TSLA"));
        assert_eq!(ledger.history().count(), 0);
    }

    #[test]
    fn test_buy_unknown_symbol() {
        let mut ledger = Ledger::default();

        let err = ledger.buy("IBM", 3).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidSymbol(_)));
        assert!(ledger.is_empty());
        assert_eq!(ledger.history().count(), 0);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut ledger = Ledger::default();

        assert!(matches!(
            ledger.buy("AAPL", 0),
            Err(PortfolioError::InvalidQuantity { reason: QuantityProblem::NotPositive, .. })
        ));

        ledger.buy("AAPL", 1).unwrap();
        assert!(matches!(
            ledger.sell("AAPL", 0),
            Err(PortfolioError::InvalidQuantity { .. })
        ));
        assert_eq!(ledger.history().count(), 1);
    }

    #[test]
    fn test_sell_everything_removes_position() {
        let mut ledger = Ledger::default();
        ledger.buy("MSFT", 4).unwrap();

        let sale = ledger.sell("MSFT", 4).unwrap();
        assert_eq!(sale.action, Action::Sell);
        assert_eq!(sale.total, dec!(1503.20));
        assert!(ledger.is_empty());
        assert_eq!(ledger.positions().count(), 0);

        // Fully sold symbol is no longer held
        assert!(matches!(ledger.sell("MSFT", 1), Err(PortfolioError::NotHeld(_))));
    }

    #[test]
    fn test_empty_valuation_and_summary() {
        let ledger = Ledger::default();

        let valuation = ledger.valuation();
        assert!(valuation.is_empty());
        assert_eq!(valuation.portfolio_total, Decimal::ZERO);
        assert!(valuation.weights().is_empty());
        assert_eq!(ledger.weight("AAPL"), None);

        let summary = ledger.summary();
        assert_eq!(summary.net_invested, Decimal::ZERO);
        assert_eq!(summary.roi, None);
        assert_eq!(summary.holdings, 0);
    }

    #[test]
    fn test_valuation_and_weights() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10).unwrap(); // 1805.00
        ledger.buy("INTC", 20).unwrap(); // 865.00

        let valuation = ledger.valuation();
        assert_eq!(valuation.holdings.len(), 2);
        assert_eq!(valuation.portfolio_total, dec!(2670.00));

        // Ordered by symbol
        assert_eq!(valuation.holdings[0].symbol, "AAPL");
        assert_eq!(valuation.holdings[1].symbol, "INTC");

        let total_weight: Decimal = valuation.weights().iter().map(|(_, w)| *w).sum();
        assert!((total_weight - dec!(100)).abs() < dec!(0.0000001));

        let aapl = ledger.weight("AAPL").unwrap();
        assert!(aapl > dec!(67.6) && aapl < dec!(67.61));
        assert_eq!(ledger.weight("TSLA"), None);
    }

    #[test]
    fn test_summary_after_partial_sale() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10).unwrap(); // 1805.00
        ledger.sell("AAPL", 4).unwrap(); // 722.00

        let summary = ledger.summary();
        assert_eq!(summary.holdings, 1);
        assert_eq!(summary.total_invested, dec!(1805.00));
        assert_eq!(summary.total_sold, dec!(722.00));
        assert_eq!(summary.net_invested, dec!(1083.00));
        assert_eq!(summary.current_value, dec!(1083.00));
        assert_eq!(summary.unrealized_gain, Decimal::ZERO);
        assert_eq!(summary.roi, Some(Decimal::ZERO));
    }

    #[test]
    fn test_history_is_restartable() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 1).unwrap();
        ledger.buy("TSLA", 2).unwrap();
        ledger.sell("AAPL", 1).unwrap();

        let history = ledger.history();
        let first_pass: Vec<_> = history.clone().map(|t| t.symbol.as_str()).collect();
        let second_pass: Vec<_> = history.map(|t| t.symbol.as_str()).collect();

        assert_eq!(first_pass, vec!["AAPL", "TSLA", "AAPL"]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_action_display() {
        assert_eq!(Action::Buy.to_string(), "BUY");
        assert_eq!(format!("{:<6}|", Action::Sell), "SELL  |");
    }
}
