use crate::portfolio::error::PortfolioError;
use crate::portfolio::export::export_valuation;
use crate::portfolio::input::{parse_quantity, parse_symbol, SymbolInput};
use crate::portfolio::{money, percent, Ledger};
use crate::utils::Console;
use chrono::Local;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Whether the menu loop should keep going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Numbered-menu front end over a [`Ledger`].
///
/// Only talks to the ledger through its public operations.
pub struct PortfolioConsole<'a, R, W> {
    ledger: &'a mut Ledger,
    console: Console<R, W>,
    export_dir: PathBuf,
}

impl<'a, R: BufRead, W: Write> PortfolioConsole<'a, R, W> {
    pub fn new(ledger: &'a mut Ledger, console: Console<R, W>, export_dir: PathBuf) -> Self {
        Self {
            ledger,
            console,
            export_dir,
        }
    }

    /// Run the menu until the user exits or input ends
    pub fn run(&mut self) -> io::Result<()> {
        self.banner()?;

        loop {
            self.menu()?;

            let Some(choice) = self.console.prompt("\nEnter your choice (1-8): ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.show_available().map(|_| Flow::Continue)?,
                "2" => self.add_stock()?,
                "3" => self.remove_stock()?,
                "4" => self.show_portfolio().map(|_| Flow::Continue)?,
                "5" => self.show_summary().map(|_| Flow::Continue)?,
                "6" => self.show_history().map(|_| Flow::Continue)?,
                "7" => self.save().map(|_| Flow::Continue)?,
                "8" => {
                    let out = self.console.out();
                    writeln!(out, "\n💼 Thank you for using Stock Portfolio Tracker!")?;
                    writeln!(out, "Happy investing! 📈")?;
                    break;
                }
                _ => {
                    writeln!(
                        self.console.out(),
                        "❌ Invalid choice! Please enter a number between 1-8."
                    )?;
                    Flow::Continue
                }
            };

            if flow == Flow::Quit || self.console.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }

        Ok(())
    }

    /// Hand back the console, mainly so tests can inspect output
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn banner(&mut self) -> io::Result<()> {
        let out = self.console.out();
        writeln!(out, "💼{}", "=".repeat(60))?;
        writeln!(out, "        WELCOME TO STOCK PORTFOLIO TRACKER")?;
        writeln!(out, "{}", "=".repeat(60))?;
        writeln!(out, "Track your stock investments and calculate portfolio value!")
    }

    fn menu(&mut self) -> io::Result<()> {
        let out = self.console.out();
        writeln!(out, "\n🎯 Main Menu:")?;
        writeln!(out, "1. 📈 View Available Stocks")?;
        writeln!(out, "2. ➕ Add Stock to Portfolio")?;
        writeln!(out, "3. ➖ Remove Stock from Portfolio")?;
        writeln!(out, "4. 👁️  View Current Portfolio")?;
        writeln!(out, "5. 📊 Portfolio Summary")?;
        writeln!(out, "6. 📋 Transaction History")?;
        writeln!(out, "7. 💾 Save Portfolio to File")?;
        writeln!(out, "8. 🚪 Exit")
    }

    fn show_available(&mut self) -> io::Result<()> {
        let out = self.console.out();
        writeln!(out, "\n📊 Available Stocks and Current Prices:")?;
        writeln!(out, "{}", "-".repeat(50))?;
        writeln!(out, "{:<12} {:<15} {:<12}", "Stock Symbol", "Company", "Price (USD)")?;
        writeln!(out, "{}", "-".repeat(50))?;

        for listing in self.ledger.prices().listings() {
            writeln!(
                out,
                "{:<12} {:<15} ${:<11}",
                listing.symbol,
                listing.company,
                money(listing.price)
            )?;
        }
        Ok(())
    }

    fn add_stock(&mut self) -> io::Result<Flow> {
        self.show_available()?;

        loop {
            let Some(text) = self
                .console
                .prompt("\nEnter stock symbol (or 'back' to return): ")?
            else {
                return Ok(Flow::Quit);
            };

            let symbol = match parse_symbol(&text) {
                SymbolInput::Back => return Ok(Flow::Continue),
                SymbolInput::Symbol(symbol) => symbol,
            };

            if !self.ledger.prices().contains(&symbol) {
                writeln!(self.console.out(), "❌ {}", PortfolioError::InvalidSymbol(symbol))?;
                continue;
            }

            let Some(text) = self
                .console
                .prompt(&format!("Enter quantity of {symbol} shares: "))?
            else {
                return Ok(Flow::Quit);
            };

            match parse_quantity(&text).and_then(|q| self.ledger.buy(&symbol, q)) {
                Ok(transaction) => {
                    let out = self.console.out();
                    writeln!(
                        out,
                        "✅ Successfully added {} shares of {}",
                        transaction.quantity, transaction.symbol
                    )?;
                    writeln!(out, "💰 Investment amount: ${}", money(transaction.total))?;
                    return Ok(Flow::Continue);
                }
                Err(e) => writeln!(self.console.out(), "❌ {e}")?,
            }
        }
    }

    fn remove_stock(&mut self) -> io::Result<Flow> {
        if self.ledger.is_empty() {
            writeln!(self.console.out(), "❌ Your portfolio is empty!")?;
            return Ok(Flow::Continue);
        }

        self.show_portfolio()?;

        loop {
            let Some(text) = self
                .console
                .prompt("\nEnter stock symbol to remove (or 'back' to return): ")?
            else {
                return Ok(Flow::Quit);
            };

            let symbol = match parse_symbol(&text) {
                SymbolInput::Back => return Ok(Flow::Continue),
                SymbolInput::Symbol(symbol) => symbol,
            };

            let held = self.ledger.quantity(&symbol);
            if held == 0 {
                writeln!(self.console.out(), "❌ {}", PortfolioError::NotHeld(symbol))?;
                continue;
            }

            let Some(text) = self
                .console
                .prompt(&format!("Enter quantity to remove (max {held}): "))?
            else {
                return Ok(Flow::Quit);
            };

            match parse_quantity(&text).and_then(|q| self.ledger.sell(&symbol, q)) {
                Ok(transaction) => {
                    let out = self.console.out();
                    writeln!(
                        out,
                        "✅ Successfully sold {} shares of {}",
                        transaction.quantity, transaction.symbol
                    )?;
                    writeln!(out, "💰 Sell amount: ${}", money(transaction.total))?;
                    return Ok(Flow::Continue);
                }
                Err(e) => writeln!(self.console.out(), "❌ {e}")?,
            }
        }
    }

    fn show_portfolio(&mut self) -> io::Result<()> {
        let valuation = self.ledger.valuation();
        let out = self.console.out();

        if valuation.is_empty() {
            return writeln!(out, "❌ Your portfolio is empty!");
        }

        writeln!(out, "\n📈 Your Current Portfolio:")?;
        writeln!(out, "{}", "-".repeat(70))?;
        writeln!(
            out,
            "{:<8} {:<8} {:<12} {:<15} {:<10}",
            "Stock", "Shares", "Price", "Total Value", "Weight"
        )?;
        writeln!(out, "{}", "-".repeat(70))?;

        for holding in &valuation.holdings {
            let weight = valuation
                .weight(&holding.symbol)
                .map(|w| format!("{}%", percent(w, 1)))
                .unwrap_or_else(|| "-".to_string());

            writeln!(
                out,
                "{:<8} {:<8} ${:<11} ${:<14} {:<10}",
                holding.symbol,
                holding.quantity,
                money(holding.unit_price),
                money(holding.total_value),
                weight
            )?;
        }

        writeln!(out, "{}", "-".repeat(70))?;
        writeln!(
            out,
            "{:<45} ${}",
            "TOTAL PORTFOLIO VALUE:",
            money(valuation.portfolio_total)
        )?;
        writeln!(out, "{}", "-".repeat(70))
    }

    fn show_summary(&mut self) -> io::Result<()> {
        let out = self.console.out();

        if self.ledger.is_empty() {
            return writeln!(out, "❌ Your portfolio is empty!");
        }

        let summary = self.ledger.summary();

        writeln!(out, "\n📊 Portfolio Summary:")?;
        writeln!(out, "{}", "-".repeat(40))?;
        writeln!(out, "Total Stocks Owned: {}", summary.holdings)?;
        writeln!(out, "Current Portfolio Value: ${}", money(summary.current_value))?;
        writeln!(out, "Total Bought: ${}", money(summary.total_invested))?;
        writeln!(out, "Total Sold: ${}", money(summary.total_sold))?;
        writeln!(out, "Net Amount Invested: ${}", money(summary.net_invested))?;
        writeln!(out, "Unrealized Gain/Loss: ${}", money(summary.unrealized_gain))?;
        if let Some(roi) = summary.roi {
            writeln!(out, "Return on Investment: {}%", percent(roi, 2))?;
        }
        Ok(())
    }

    fn show_history(&mut self) -> io::Result<()> {
        let out = self.console.out();
        let mut history = self.ledger.history().peekable();

        if history.peek().is_none() {
            return writeln!(out, "❌ No transactions found!");
        }

        writeln!(out, "\n📋 Transaction History:")?;
        writeln!(out, "{}", "-".repeat(80))?;
        writeln!(
            out,
            "{:<20} {:<6} {:<8} {:<8} {:<12} {:<12}",
            "Date", "Action", "Symbol", "Shares", "Price", "Total"
        )?;
        writeln!(out, "{}", "-".repeat(80))?;

        for t in history {
            writeln!(
                out,
                "{:<20} {:<6} {:<8} {:<8} ${:<11} ${:<11}",
                t.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                t.action,
                t.symbol,
                t.quantity,
                money(t.unit_price),
                money(t.total)
            )?;
        }
        Ok(())
    }

    fn save(&mut self) -> io::Result<()> {
        if self.ledger.is_empty() {
            return writeln!(
                self.console.out(),
                "❌ Your portfolio is empty! Nothing to save."
            );
        }

        let report = export_valuation(&self.ledger.valuation(), &self.export_dir, Local::now());
        let out = self.console.out();

        for (kind, outcome) in [("CSV", &report.csv), ("TXT", &report.text)] {
            match outcome {
                Ok(path) => writeln!(out, "✅ Portfolio saved to {kind}: {}", path.display())?,
                Err(e) => writeln!(out, "❌ Error saving {kind}: {e}")?,
            }
        }
        Ok(())
    }
}
