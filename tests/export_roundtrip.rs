use chrono::{Local, TimeZone};
use console_suite::portfolio::export::{export_valuation, read_csv, write_csv, CSV_HEADER};
use console_suite::portfolio::Ledger;
use rust_decimal_macros::dec;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::default();
    ledger.buy("AAPL", 10).unwrap();
    ledger.buy("INTC", 7).unwrap();
    ledger.buy("NVDA", 3).unwrap();
    ledger.sell("INTC", 2).unwrap();
    ledger
}

#[test]
fn test_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.csv");
    let ledger = sample_ledger();
    let valuation = ledger.valuation();

    write_csv(&valuation, &path).unwrap();
    let read_back = read_csv(&path).unwrap();

    assert_eq!(read_back, valuation);
    assert_eq!(read_back.portfolio_total, dec!(3371.85));
}

#[test]
fn test_csv_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("portfolio.csv");

    let mut ledger = Ledger::default();
    ledger.buy("AAPL", 10).unwrap();
    write_csv(&ledger.valuation(), &path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();

    assert_eq!(lines[0], CSV_HEADER.join(","));
    assert_eq!(lines[1], "AAPL,10,180.50,1805.00");
    assert_eq!(lines[2], ",,TOTAL PORTFOLIO VALUE:,1805.00");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_export_writes_timestamped_pair() {
    let dir = tempfile::tempdir().unwrap();
    let at = Local.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let ledger = sample_ledger();

    let report = export_valuation(&ledger.valuation(), dir.path(), at);
    assert!(report.all_ok());

    let csv_path = report.csv.unwrap();
    let text_path = report.text.unwrap();
    assert_eq!(csv_path, dir.path().join("portfolio_20250102_030405.csv"));
    assert_eq!(text_path, dir.path().join("portfolio_20250102_030405.txt"));

    assert_eq!(read_csv(&csv_path).unwrap(), ledger.valuation());

    let report_text = std::fs::read_to_string(&text_path).unwrap();
    assert!(report_text.starts_with("STOCK PORTFOLIO REPORT\n"));
    assert!(report_text.contains("Generated: 2025-01-02 03:04:05"));
    assert!(report_text.trim_end().ends_with("TOTAL PORTFOLIO VALUE: $3371.85"));
}

#[test]
fn test_failed_export_leaves_ledger_alone() {
    let ledger = sample_ledger();
    let before = ledger.valuation();

    let report = export_valuation(
        &ledger.valuation(),
        std::path::Path::new("/nonexistent/export/dir"),
        Local::now(),
    );

    assert!(report.csv.is_err());
    assert!(report.text.is_err());
    assert_eq!(ledger.valuation(), before);
    assert_eq!(ledger.history().count(), 4);
}
