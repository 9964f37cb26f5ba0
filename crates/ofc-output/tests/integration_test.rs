//! Integration tests for report export and text summaries.

use approx::assert_relative_eq;
use ofc_core::{CompanyAnalysis, Period, PeriodMetrics, calculate};
use ofc_output::{
    AnalysisReport, CompanyOutcome, ExportFormat, Exporter, MetricsRow, render_report,
};
use serde_json::json;

fn company(inn: &str) -> CompanyAnalysis {
    let previous = json!({
        "year": 2022,
        "balance_sheet": { "inventories": 100, "total_assets": 800, "equity": 400 },
        "income_statement": { "revenue": 900, "cost_of_goods_sold": 500, "net_income": 100 }
    });
    let current = json!({
        "year": 2023,
        "balance_sheet": {
            "inventories": 200, "accounts_receivable": 100, "accounts_payable": 80,
            "current_assets": 500, "current_liabilities": 250,
            "cash_and_cash_equivalents": 50, "total_assets": 1000,
            "total_liabilities": 400, "equity": 600
        },
        "income_statement": { "revenue": 1000, "cost_of_goods_sold": 600, "net_income": 150 }
    });

    CompanyAnalysis {
        inn: inn.to_string(),
        source: "Demo data".to_string(),
        periods: vec![
            PeriodMetrics {
                period: Period::annual(2022),
                previous_period: None,
                metrics: calculate(&previous, None),
            },
            PeriodMetrics {
                period: Period::annual(2023),
                previous_period: Some(Period::annual(2022)),
                metrics: calculate(&current, Some(&previous)),
            },
        ],
    }
}

fn report() -> AnalysisReport {
    AnalysisReport::new(
        "Demo data",
        true,
        vec![
            CompanyOutcome::Completed(company("7707083893")),
            CompanyOutcome::Failed {
                inn: "500100732259".to_string(),
                error: "Network error: timed out".to_string(),
            },
            CompanyOutcome::Completed(company("7736207543")),
        ],
    )
}

#[test]
fn test_csv_rows_parse_back() {
    let csv = report().export_to_string(ExportFormat::Csv).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<MetricsRow> = reader.deserialize().collect::<Result<_, _>>().unwrap();

    assert_eq!(rows.len(), 5);
    assert_eq!(rows, report().to_rows());

    let latest = &rows[1];
    assert_eq!(latest.inn, "7707083893");
    assert_eq!(latest.year, Some(2023));
    assert_eq!(latest.quarter, None);
    assert_eq!(latest.previous_period.as_deref(), Some("2022"));
    assert_relative_eq!(latest.poi.unwrap(), 365.0 * 150.0 / 600.0);
    assert_relative_eq!(latest.roe.unwrap(), 30.0);

    let failed = &rows[2];
    assert_eq!(failed.inn, "500100732259");
    assert_eq!(failed.year, None);
    assert!(failed.current_ratio.is_none());
    assert_eq!(failed.error.as_deref(), Some("Network error: timed out"));

    // 2022 has no current liabilities
    assert!(rows[0].current_ratio.is_none());
}

#[test]
fn test_export_to_file() {
    let path = std::env::temp_dir().join(format!("ofc-report-{}.json", std::process::id()));
    let report = report();
    report
        .export_to_file(&path, ExportFormat::from_path(&path).unwrap())
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let back: AnalysisReport = serde_json::from_str(&text).unwrap();
    assert_eq!(back.companies.len(), 3);
    assert_eq!(back.companies[1].inn(), "500100732259");
    assert_eq!(back, report);
}

#[test]
fn test_text_report_keeps_request_order() {
    let text = render_report(&report());
    let first = text.find("INN 7707083893").unwrap();
    let failed = text.find("INN 500100732259: FAILED").unwrap();
    let last = text.find("INN 7736207543").unwrap();
    assert!(first < failed && failed < last);
    assert!(text.contains("(mock mode)"));
}
