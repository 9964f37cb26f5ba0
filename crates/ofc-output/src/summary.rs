//! Plain-text ratio tables.

use crate::export::{AnalysisReport, CompanyOutcome};
use ofc_core::{CompanyAnalysis, MetricsResult};

/// Shown in place of an undefined ratio.
pub const MISSING: &str = "—";

const LABEL_WIDTH: usize = 30;
const VALUE_WIDTH: usize = 12;

struct Section {
    title: &'static str,
    rows: &'static [(&'static str, fn(&MetricsResult) -> Option<f64>)],
}

const SECTIONS: [Section; 4] = [
    Section {
        title: "Operating financial cycle (days)",
        rows: &[
            ("Inventory period", |m| m.ofc.poi),
            ("Receivables period", |m| m.ofc.ppd),
            ("Payables period", |m| m.ofc.ppa),
            ("Operating cycle", |m| m.ofc.ofc),
        ],
    },
    Section {
        title: "Liquidity (x)",
        rows: &[
            ("Current ratio", |m| m.liquidity.current_ratio),
            ("Quick ratio", |m| m.liquidity.quick_ratio),
            ("Absolute liquidity", |m| m.liquidity.absolute_ratio),
        ],
    },
    Section {
        title: "Profitability (%)",
        rows: &[
            ("ROA", |m| m.profitability.roa),
            ("ROE", |m| m.profitability.roe),
            ("Gross margin", |m| m.profitability.gross_margin),
            ("Net margin", |m| m.profitability.net_margin),
        ],
    },
    Section {
        title: "Stability",
        rows: &[
            ("Autonomy, %", |m| m.stability.autonomy),
            ("Financial leverage, x", |m| m.stability.financial_leverage),
            ("Debt ratio, %", |m| m.stability.debt_ratio),
            ("Debt to equity, x", |m| m.stability.debt_to_equity),
        ],
    },
];

/// Format a ratio with two decimals, or [`MISSING`].
pub fn format_ratio(value: Option<f64>) -> String {
    value.map_or_else(|| MISSING.to_string(), |v| format!("{v:.2}"))
}

/// Render every period of one company as a table, one column per period.
pub fn render_company(analysis: &CompanyAnalysis) -> String {
    let mut output = String::new();

    output.push_str(&format!("\nINN {} ({})\n", analysis.inn, analysis.source));
    output.push_str(&"=".repeat(80));
    output.push('\n');

    if analysis.periods.is_empty() {
        output.push_str("  no periods\n");
        return output;
    }

    output.push_str(&format!("{:<LABEL_WIDTH$}", "Period"));
    for period in &analysis.periods {
        output.push_str(&format!("{:>VALUE_WIDTH$}", period.period.to_string()));
    }
    output.push('\n');

    for section in &SECTIONS {
        output.push_str(&format!("\n{}\n", section.title));
        output.push_str(&"-".repeat(LABEL_WIDTH + VALUE_WIDTH * analysis.periods.len()));
        output.push('\n');

        for (label, value) in section.rows {
            output.push_str(&format!("  {:<width$}", label, width = LABEL_WIDTH - 2));
            for period in &analysis.periods {
                let cell = format_ratio(value(&period.metrics));
                output.push_str(&format!("{cell:>VALUE_WIDTH$}"));
            }
            output.push('\n');
        }
    }

    output
}

/// Render a whole report: a header, each company's table and the failures.
pub fn render_report(report: &AnalysisReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Source: {}{}\n",
        report.source,
        if report.mock_mode { " (mock mode)" } else { "" }
    ));
    output.push_str(&format!(
        "Generated: {}\n",
        report.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for outcome in &report.companies {
        match outcome {
            CompanyOutcome::Completed(analysis) => output.push_str(&render_company(analysis)),
            CompanyOutcome::Failed { inn, error } => {
                output.push_str(&format!("\nINN {inn}: FAILED\n  {error}\n"));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use ofc_core::{Period, PeriodMetrics, calculate};
    use serde_json::json;

    fn analysis() -> CompanyAnalysis {
        let report = json!({
            "income_statement": { "revenue": 1000, "cost_of_goods_sold": 0, "net_income": 150 },
            "balance_sheet": { "current_assets": 500, "current_liabilities": 250, "total_assets": 1000, "equity": 600 }
        });
        CompanyAnalysis {
            inn: "7707083893".to_string(),
            source: "Demo data".to_string(),
            periods: vec![
                PeriodMetrics {
                    period: Period::annual(2022),
                    previous_period: None,
                    metrics: calculate(&report, None),
                },
                PeriodMetrics {
                    period: Period::quarterly(2023, 1),
                    previous_period: Some(Period::annual(2022)),
                    metrics: calculate(&report, Some(&report)),
                },
            ],
        }
    }

    #[test]
    fn test_format_ratio() {
        assert_eq!(format_ratio(Some(121.6666)), "121.67");
        assert_eq!(format_ratio(Some(-0.5)), "-0.50");
        assert_eq!(format_ratio(None), MISSING);
    }

    #[test]
    fn test_render_company() {
        let table = render_company(&analysis());
        assert!(table.contains("INN 7707083893 (Demo data)"));
        assert!(table.contains("2022"));
        assert!(table.contains("2023 Q1"));
        assert!(table.contains("Operating financial cycle (days)"));

        let cycle = table
            .lines()
            .find(|line| line.trim_start().starts_with("Inventory period"))
            .unwrap();
        assert_eq!(cycle.matches(MISSING).count(), 2);

        let current = table
            .lines()
            .find(|line| line.trim_start().starts_with("Current ratio"))
            .unwrap();
        assert!(current.ends_with("2.00        2.00"));
    }

    #[test]
    fn test_render_report_lists_failures() {
        let report = AnalysisReport::new(
            "Checko API",
            false,
            vec![
                CompanyOutcome::Failed {
                    inn: "1".to_string(),
                    error: "boom".to_string(),
                },
                CompanyOutcome::Completed(analysis()),
            ],
        );
        let text = render_report(&report);
        assert!(text.starts_with("Source: Checko API\n"));
        assert!(text.contains("INN 1: FAILED\n  boom"));
        assert!(text.find("INN 1:").unwrap() < text.find("INN 7707083893").unwrap());
    }
}
