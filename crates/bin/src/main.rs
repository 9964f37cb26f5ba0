//! OFC CLI binary.
//!
//! Computes the operating financial cycle and financial ratios for companies
//! identified by INN.

use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use ofc::data::checko::extract_reports;
use ofc::engine::normalize;
use ofc::output::render_report;
use ofc::{
    AnalysisConfig, Analyzer, CompanyOutcome, DEFAULT_CONCURRENCY, DataSource, ExportFormat,
    Exporter, FinancialsSource, Period, ProviderConfig,
};
use serde_json::{Value, json};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ofc")]
#[command(about = "Operating financial cycle and financial ratios by INN", long_about = None)]
#[command(version)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Compute ratios for one or more companies
    Analyze {
        /// Company INNs separated by commas, semicolons or newlines
        #[arg(long, required = true)]
        inn: Vec<String>,

        /// Reporting years, comma separated
        #[arg(long, value_delimiter = ',', required_unless_present = "period")]
        year: Vec<i32>,

        /// Quarter (1-4) applied to every year
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4))]
        quarter: Option<u8>,

        /// Explicit periods such as 2023 or 2023Q2, comma separated
        #[arg(long, value_delimiter = ',', conflicts_with_all = ["year", "quarter"])]
        period: Vec<Period>,

        /// Do not average the first period against the one before it
        #[arg(long)]
        no_prior: bool,

        /// Period to average the first one against, such as 2021 or 2022Q4
        #[arg(long, conflicts_with = "no_prior")]
        previous: Option<Period>,

        /// Output format (text, json, pretty-json or csv)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write output to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Companies fetched concurrently
        #[arg(long, env = "OFC_CONCURRENCY", default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Show the effective data provider configuration
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Print the normalized statements found in a raw provider response
    Normalize {
        /// JSON file with a provider response
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct ProviderArgs {
    /// Use demo data instead of the Checko API
    #[arg(long)]
    mock: bool,

    /// Demo dataset to use instead of the bundled one (implies --mock)
    #[arg(long)]
    mock_data: Option<PathBuf>,

    /// Checko companies endpoint
    #[arg(long)]
    api_base: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl ProviderArgs {
    /// Environment configuration with the command-line overrides applied.
    fn config(&self) -> ProviderConfig {
        let mut config = ProviderConfig::from_env();
        if let Some(base_url) = &self.api_base {
            config = config.with_base_url(base_url);
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if self.mock || self.mock_data.is_some() {
            config = config.with_mock(self.mock_data.clone());
        }
        config
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Analyze {
            inn,
            year,
            quarter,
            period,
            no_prior,
            previous,
            format,
            output,
            concurrency,
            provider,
        } => {
            let inns = parse_inns(&inn);
            let periods = requested_periods(&year, quarter, &period);
            let format = parse_format(&format)?;
            let config = AnalysisConfig {
                concurrency,
                include_prior: !no_prior,
                prior: previous,
            };
            let provider = provider.config();
            analyze(&inns, &periods, config, &provider, format, output.as_deref()).await?;
        }
        Commands::Status { json, provider } => {
            show_status(&provider.config(), json)?;
        }
        Commands::Normalize { file } => {
            normalize_file(&file)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// `None` means the plain-text summary.
fn parse_format(format: &str) -> Result<Option<ExportFormat>, Box<dyn std::error::Error>> {
    if format.trim().eq_ignore_ascii_case("text") {
        return Ok(None);
    }
    Ok(Some(format.parse()?))
}

/// Split `--inn` values on commas, semicolons and newlines.
fn parse_inns(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split([',', ';', '\n']))
        .map(str::trim)
        .filter(|inn| !inn.is_empty())
        .map(str::to_string)
        .collect()
}

fn requested_periods(years: &[i32], quarter: Option<u8>, periods: &[Period]) -> Vec<Period> {
    if !periods.is_empty() {
        return periods.to_vec();
    }
    years
        .iter()
        .map(|&year| match quarter {
            Some(q) => Period::quarterly(year, q),
            None => Period::annual(year),
        })
        .collect()
}

async fn analyze(
    inns: &[String],
    periods: &[Period],
    config: AnalysisConfig,
    provider: &ProviderConfig,
    format: Option<ExportFormat>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = DataSource::from_config(provider)?;
    if source.is_mock() {
        eprintln!("Using {} (mock mode)", source.label());
    }
    let analyzer = Analyzer::with_config(source, config);

    let pb = ProgressBar::new(inns.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓░"));
    }
    pb.set_message("Fetching financial statements...");

    let report = analyzer
        .analyze_with_progress(inns, periods, |outcome: &CompanyOutcome| {
            pb.set_message(outcome.inn().to_string());
            pb.inc(1);
        })
        .await?;
    pb.finish_and_clear();

    match (format, output) {
        (Some(format), Some(path)) => {
            report.export_to_file(path, format)?;
            info!(path = %path.display(), %format, "report written");
        }
        (Some(format), None) => {
            report.export_to_writer(&mut io::stdout().lock(), format)?;
        }
        (None, Some(path)) => {
            fs::write(path, render_report(&report))?;
            info!(path = %path.display(), "report written");
        }
        (None, None) => {
            print!("{}", render_report(&report));
            io::stdout().flush()?;
        }
    }

    let failed = report.failure_count();
    if failed == report.companies.len() {
        return Err(format!("analysis failed for all {failed} INN(s)").into());
    }
    if failed > 0 {
        eprintln!("Warning: {failed} of {} INN(s) failed", report.companies.len());
    }
    Ok(())
}

fn show_status(config: &ProviderConfig, as_json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = config.source_label();
    let mock_data = config
        .mock_data
        .as_ref()
        .map(|path| path.display().to_string());

    if as_json {
        let status = json!({
            "status": "ok",
            "mockMode": config.mock_mode,
            "source": source,
            "baseUrl": config.base_url,
            "apiKeyConfigured": config.has_api_key(),
            "mockData": mock_data,
            "timeoutSecs": config.timeout.as_secs(),
            "version": ofc::VERSION,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("OFC {}", ofc::VERSION);
    println!("{}", "=".repeat(40));
    println!("  {:<14} {}", "Mode:", if config.mock_mode { "mock" } else { "live" });
    println!("  {:<14} {}", "Source:", source);
    println!("  {:<14} {}", "API base:", config.base_url);
    println!(
        "  {:<14} {}",
        "API key:",
        if config.has_api_key() { "set" } else { "not set" }
    );
    println!("  {:<14} {}s", "Timeout:", config.timeout.as_secs());
    if config.mock_mode {
        println!(
            "  {:<14} {}",
            "Mock data:",
            mock_data.as_deref().unwrap_or("bundled")
        );
    }
    Ok(())
}

fn normalize_file(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let response: Value = serde_json::from_str(&text)?;

    let reports = extract_reports(&response);
    if reports.is_empty() {
        return Err(format!("no financial reports found in {}", path.display()).into());
    }

    let statements: Vec<_> = reports.iter().map(normalize).collect();
    println!("{}", serde_json::to_string_pretty(&statements)?);
    Ok(())
}
