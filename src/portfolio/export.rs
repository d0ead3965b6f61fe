use crate::portfolio::error::{PortfolioError, Result};
use crate::portfolio::ledger::{Holding, Valuation};
use crate::portfolio::money;
use anyhow::{anyhow, Context};
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const CSV_HEADER: [&str; 4] = ["Stock Symbol", "Quantity", "Price per Share", "Total Value"];
const TOTAL_LABEL: &str = "TOTAL PORTFOLIO VALUE:";
const RULE_WIDTH: usize = 50;

/// Outcome of writing both export files.
///
/// Each file is attempted independently, so one failing does not stop the
/// other.
#[derive(Debug)]
pub struct ExportReport {
    pub csv: Result<PathBuf>,
    pub text: Result<PathBuf>,
}

impl ExportReport {
    pub fn all_ok(&self) -> bool {
        self.csv.is_ok() && self.text.is_ok()
    }
}

/// `portfolio_<YYYYMMDD_HHMMSS>`
pub fn file_stem(at: &DateTime<Local>) -> String {
    format!("portfolio_{}", at.format("%Y%m%d_%H%M%S"))
}

/// Write the CSV and text report for `valuation` into `dir`.
///
/// Never fails as a whole; per-file errors are carried in the report.
pub fn export_valuation(
    valuation: &Valuation,
    dir: &Path,
    generated_at: DateTime<Local>,
) -> ExportReport {
    let stem = file_stem(&generated_at);
    let csv_path = dir.join(format!("{stem}.csv"));
    let text_path = dir.join(format!("{stem}.txt"));

    let csv = write_csv(valuation, &csv_path).map(|_| csv_path);
    let text = write_text_report(valuation, &text_path, &generated_at).map(|_| text_path);

    for outcome in [&csv, &text] {
        match outcome {
            Ok(path) => info!(path = %path.display(), "portfolio exported"),
            Err(e) => warn!(error = %e, "portfolio export failed"),
        }
    }

    ExportReport { csv, text }
}

/// Write the tabular export: header, one row per holding, total trailer
pub fn write_csv(valuation: &Valuation, path: &Path) -> Result<()> {
    let io_err = |source: std::io::Error| PortfolioError::ExportIo {
        path: path.to_path_buf(),
        source,
    };

    // Header is written by hand so an empty valuation still gets one
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| io_err(e.into()))?;

    writer.write_record(CSV_HEADER).map_err(|e| io_err(e.into()))?;

    for holding in &valuation.holdings {
        writer.serialize(holding).map_err(|e| io_err(e.into()))?;
    }

    let total = valuation.portfolio_total.to_string();
    writer
        .write_record(["", "", TOTAL_LABEL, total.as_str()])
        .map_err(|e| io_err(e.into()))?;

    writer.flush().map_err(io_err)
}

/// Render the fixed-width plain-text report
pub fn render_text_report(valuation: &Valuation, generated_at: &DateTime<Local>) -> String {
    let mut out = String::new();
    let rule = "-".repeat(RULE_WIDTH);

    // Writing into a String cannot fail
    let _ = writeln!(out, "STOCK PORTFOLIO REPORT");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out, "Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out);
    let _ = writeln!(out, "{:<8} {:<8} {:<12} {:<15}", "Stock", "Shares", "Price", "Total Value");
    let _ = writeln!(out, "{rule}");

    for holding in &valuation.holdings {
        let _ = writeln!(
            out,
            "{:<8} {:<8} ${:<11} ${:<14}",
            holding.symbol,
            holding.quantity,
            money(holding.unit_price),
            money(holding.total_value),
        );
    }

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{} ${}", TOTAL_LABEL, money(valuation.portfolio_total));

    out
}

pub fn write_text_report(
    valuation: &Valuation,
    path: &Path,
    generated_at: &DateTime<Local>,
) -> Result<()> {
    std::fs::write(path, render_text_report(valuation, generated_at)).map_err(|source| {
        PortfolioError::ExportIo {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// Read a tabular export back into a valuation
pub fn read_csv(path: &Path) -> anyhow::Result<Valuation> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut holdings = Vec::new();
    let mut portfolio_total = None;

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Bad CSV record at row {}", line + 1))?;
        let field = |i: usize| record.get(i).unwrap_or("");

        // Trailer row leaves the first two columns blank
        if field(0).is_empty() {
            let total: Decimal = field(3)
                .parse()
                .with_context(|| format!("Bad portfolio total '{}'", field(3)))?;
            portfolio_total = Some(total);
            continue;
        }

        holdings.push(Holding {
            symbol: field(0).to_string(),
            quantity: field(1)
                .parse()
                .with_context(|| format!("Bad quantity '{}'", field(1)))?,
            unit_price: field(2)
                .parse()
                .with_context(|| format!("Bad price '{}'", field(2)))?,
            total_value: field(3)
                .parse()
                .with_context(|| format!("Bad total value '{}'", field(3)))?,
        });
    }

    let portfolio_total =
        portfolio_total.ok_or_else(|| anyhow!("{} has no total row", path.display()))?;

    Ok(Valuation {
        holdings,
        portfolio_total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portfolio::Ledger;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(&fixed_time()), "portfolio_20240309_140507");
    }

    #[test]
    fn test_text_report_layout() {
        let mut ledger = Ledger::default();
        ledger.buy("AAPL", 10).unwrap();

        let report = render_text_report(&ledger.valuation(), &fixed_time());
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "STOCK PORTFOLIO REPORT");
        assert_eq!(lines[1], "=".repeat(50));
        assert_eq!(lines[2], "Generated: 2024-03-09 14:05:07");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "Stock    Shares   Price        Total Value    ");
        assert_eq!(lines[6], "AAPL     10       $180.50      $1805.00       ");
        assert_eq!(lines[8], "TOTAL PORTFOLIO VALUE: $1805.00");
    }

    #[test]
    fn test_empty_valuation_csv_keeps_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_csv(&Ledger::default().valuation(), &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, [CSV_HEADER.join(",").as_str(), ",,TOTAL PORTFOLIO VALUE:,0"]);
    }

    #[test]
    fn test_unwritable_directory_is_reported() {
        let ledger = Ledger::default();
        let missing = Path::new("/nonexistent/definitely/not/here");

        let report = export_valuation(&ledger.valuation(), missing, fixed_time());

        assert!(!report.all_ok());
        assert!(matches!(report.csv, Err(PortfolioError::ExportIo { .. })));
        assert!(matches!(report.text, Err(PortfolioError::ExportIo { .. })));
    }
}
