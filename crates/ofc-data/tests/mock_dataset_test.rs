//! The bundled demo dataset must be readable by the engine in every shape it uses.

use approx::assert_relative_eq;
use ofc_core::{Period, calculate, normalize, select};
use ofc_data::{DataSource, FinancialsSource, MockSource, ProviderConfig};
use std::io::Write;

#[test]
fn test_every_bundled_period_is_selectable() {
    let mock = MockSource::bundled().unwrap();
    let reports = mock.reports();

    let periods = [
        Period::annual(2021),
        Period::annual(2022),
        Period::quarterly(2023, 1),
        Period::quarterly(2023, 2),
        Period::quarterly(2023, 3),
        Period::annual(2023),
        Period::quarterly(2024, 1),
        Period::quarterly(2024, 2),
    ];

    for period in periods {
        let report = select(reports, period).unwrap_or_else(|| panic!("no report for {period}"));
        let statement = normalize(report);
        assert_eq!(statement.period(), Some(period));
        assert!(statement.balance_sheet.total_assets > 0.0, "{period}");
        assert!(statement.balance_sheet.equity > 0.0, "{period}");
        assert!(statement.income_statement.revenue > 0.0, "{period}");
    }
}

#[test]
fn test_annual_2024_falls_back_to_latest_quarter() {
    let mock = MockSource::bundled().unwrap();
    let report = select(mock.reports(), Period::annual(2024)).unwrap();
    assert_eq!(normalize(report).quarter, Some(2));
}

#[test]
fn test_vendor_shaped_year_matches_canonical_scenario() {
    let mock = MockSource::bundled().unwrap();
    let current = select(mock.reports(), Period::annual(2022)).unwrap();
    let metrics = calculate(current, None);

    assert_relative_eq!(metrics.ofc.ppd.unwrap(), 36.5);
    assert_relative_eq!(metrics.ofc.ofc.unwrap(), 109.5, epsilon = 1e-9);
    assert_relative_eq!(metrics.liquidity.quick_ratio.unwrap(), 1.2);
    assert_relative_eq!(metrics.stability.autonomy.unwrap(), 60.0);
}

#[tokio::test]
async fn test_mock_data_file_from_config() {
    let path = std::env::temp_dir().join(format!("ofc-mock-{}.json", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    write!(
        file,
        r#"[{{"year": 2020, "balance_sheet": {{"total_assets": 10, "equity": 4}}}}]"#
    )
    .unwrap();
    drop(file);

    let config = ProviderConfig::default().with_mock(Some(path.clone()));
    let source = DataSource::from_config(&config).unwrap();
    let reports = source.fetch_reports("7707083893", 2020).await.unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reports.len(), 1);
    let metrics = calculate(&reports[0], None);
    assert_relative_eq!(metrics.stability.autonomy.unwrap(), 40.0);
}
