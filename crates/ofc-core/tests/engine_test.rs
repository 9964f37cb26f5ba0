//! End-to-end tests of the engine: locate, select, normalize and calculate.

use approx::assert_relative_eq;
use ofc_core::{Field, Period, calculate, locate, normalize, select};
use serde_json::{Value, json};

fn provider_response() -> Value {
    json!({
        "meta": { "inn": "7707083893", "source": "test" },
        "data": {
            "finances": [
                {
                    "report_year": 2022,
                    "balance": {
                        "inventory": "100", "receivables": 60, "payables": 40,
                        "total_current_assets": 400, "short_term_liabilities": 200,
                        "cash": 30, "assets_total": 800, "liabilities_total": 400,
                        "capital": 400
                    },
                    "income": { "sales": 900, "cogs": 500, "net_profit": 100 }
                },
                {
                    "period": { "year": 2023 },
                    "balance_sheet": [
                        { "code": "1210", "value": 200 },
                        { "code": "1230", "value": 100 },
                        { "code": "1520", "value": 80 },
                        { "code": "1200", "value": 500 },
                        { "code": "1500", "value": 250 },
                        { "code": "1250", "value": 50 },
                        { "code": "1600", "value": 1000 },
                        { "code": "1300", "value": 600 }
                    ],
                    "income_statement": [
                        { "code": "2110", "value": 1000 },
                        { "code": "2120", "value": 600 },
                        { "code": "2400", "value": 150 }
                    ]
                },
                { "year": 2023, "quarter": 4, "balance_sheet": { "1600": 990 } }
            ]
        }
    })
}

#[test]
fn test_full_pipeline_with_previous_period() {
    let response = provider_response();
    let reports = locate(&response);
    assert_eq!(reports.len(), 3);

    let current = select(reports, Period::annual(2023)).unwrap();
    let previous = select(reports, Period::annual(2022)).unwrap();
    let metrics = calculate(current, Some(previous));

    // Averages against 2022: inventories 150, receivables 80, payables 60.
    assert_relative_eq!(metrics.ofc.poi.unwrap(), 365.0 * 150.0 / 600.0);
    assert_relative_eq!(metrics.ofc.ppd.unwrap(), 365.0 * 80.0 / 1000.0);
    assert_relative_eq!(metrics.ofc.ppa.unwrap(), 365.0 * 60.0 / 600.0);
    assert_relative_eq!(
        metrics.ofc.ofc.unwrap(),
        metrics.ofc.poi.unwrap() + metrics.ofc.ppd.unwrap() - metrics.ofc.ppa.unwrap()
    );
    assert_relative_eq!(metrics.profitability.roa.unwrap(), 150.0 * 100.0 / 900.0);
    assert_relative_eq!(metrics.profitability.roe.unwrap(), 150.0 * 100.0 / 500.0);
    assert_relative_eq!(metrics.liquidity.current_ratio.unwrap(), 2.0);

    // No total liabilities line in the coded 2023 balance sheet.
    assert_eq!(metrics.stability.debt_ratio, Some(0.0));
    assert_eq!(metrics.normalized.current.year, Some(2023));
    assert_eq!(metrics.normalized.previous.and_then(|p| p.year), Some(2022));
}

#[test]
fn test_quarter_selection_in_located_array() {
    let response = provider_response();
    let reports = locate(&response);
    let q4 = select(reports, Period::quarterly(2023, 4)).unwrap();
    assert_eq!(normalize(q4).get(Field::TotalAssets), 990.0);
}

#[test]
fn test_normalize_always_finite() {
    let inputs = [
        json!(null),
        json!(42),
        json!("report"),
        json!([]),
        json!({ "balance_sheet": "n/a", "income_statement": [null, 1, "x"] }),
        json!({ "balance_sheet": { "inventories": "1e999", "equity": [1, 2] } }),
        json!({ "income": { "revenue": { "value": 10 }, "cogs": true } }),
        json!({ "balance_sheet": { "cash": "-0x10" } }),
    ];

    for input in &inputs {
        let statement = normalize(input);
        for field in Field::BALANCE_SHEET.into_iter().chain(Field::INCOME_STATEMENT) {
            assert!(
                statement.get(field).is_finite(),
                "{field} not finite for {input}"
            );
        }
        let metrics = calculate(input, Some(input));
        for (name, value) in metrics.ratios() {
            assert!(value.is_none_or(f64::is_finite), "{name} for {input}");
        }
    }
}

#[test]
fn test_normalized_statement_round_trips_through_engine() {
    let response = provider_response();
    let reports = locate(&response);
    let raw = select(reports, Period::annual(2022)).unwrap();

    let once = normalize(raw);
    let as_raw = serde_json::to_value(once).unwrap();
    assert_eq!(normalize(&as_raw), once);
    assert_eq!(calculate(&as_raw, None), calculate(raw, None));
}
