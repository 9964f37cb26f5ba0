//! Per-company analysis over a sequence of periods.
//!
//! Each INN is analysed independently. Its periods are handled in ascending
//! order and every period is averaged against the report used for the period
//! before it, so the sequence cannot be split. Different INNs run
//! concurrently.

use crate::error::{AnalysisError, Result};
use futures::future::try_join_all;
use futures::stream::{self, StreamExt};
use ofc_core::{CompanyAnalysis, Period, PeriodMetrics, RawReport, calculate, select};
use ofc_data::{FinancialsSource, validate_inn};
use ofc_output::{AnalysisReport, CompanyOutcome};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

/// Default number of INNs fetched at the same time.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Settings for an analysis run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Maximum number of INNs in flight.
    pub concurrency: usize,
    /// Also fetch the period before the first requested one, so the first
    /// period is averaged too.
    pub include_prior: bool,
    /// Comparison period for the first requested one. Defaults to the period
    /// immediately before it.
    pub prior: Option<Period>,
}

impl AnalysisConfig {
    /// The period the first requested period is averaged against, if any.
    pub fn prior_period(&self, first: Period) -> Option<Period> {
        self.include_prior
            .then(|| self.prior.unwrap_or_else(|| first.preceding()))
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            include_prior: true,
            prior: None,
        }
    }
}

/// Sort periods ascending and drop duplicates.
pub fn prepare_periods(periods: &[Period]) -> Vec<Period> {
    let unique: BTreeSet<Period> = periods.iter().copied().collect();
    unique.into_iter().collect()
}

/// Runs analyses against a statement source.
#[derive(Debug)]
pub struct Analyzer<S> {
    source: S,
    config: AnalysisConfig,
}

impl<S: FinancialsSource> Analyzer<S> {
    /// Create an analyzer with the default settings.
    pub fn new(source: S) -> Self {
        Self::with_config(source, AnalysisConfig::default())
    }

    /// Create an analyzer with custom settings.
    pub const fn with_config(source: S, config: AnalysisConfig) -> Self {
        Self { source, config }
    }

    /// The statement source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The analysis settings.
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse every INN for the given periods.
    ///
    /// # Errors
    /// Fails only when no INN or no period is given. Failures of individual
    /// INNs are recorded in the report.
    pub async fn analyze(&self, inns: &[String], periods: &[Period]) -> Result<AnalysisReport> {
        self.analyze_with_progress(inns, periods, |_| {}).await
    }

    /// Like [`Self::analyze`], calling `on_company` as each INN finishes.
    ///
    /// # Errors
    /// Fails only when no INN or no period is given.
    pub async fn analyze_with_progress<F>(
        &self,
        inns: &[String],
        periods: &[Period],
        on_company: F,
    ) -> Result<AnalysisReport>
    where
        F: Fn(&CompanyOutcome),
    {
        if inns.is_empty() {
            return Err(AnalysisError::NoInns);
        }
        let periods = prepare_periods(periods);
        if periods.is_empty() {
            return Err(AnalysisError::NoPeriods);
        }

        let periods = &periods;
        let mut outcomes: Vec<(usize, CompanyOutcome)> = stream::iter(inns.iter().enumerate())
            .map(|(idx, inn)| async move {
                let outcome = match self.analyze_company(inn, periods).await {
                    Ok(analysis) => CompanyOutcome::Completed(analysis),
                    Err(e) => {
                        warn!(inn = %inn, error = %e, "analysis failed");
                        CompanyOutcome::Failed {
                            inn: inn.trim().to_string(),
                            error: e.to_string(),
                        }
                    }
                };
                (idx, outcome)
            })
            .buffer_unordered(self.config.concurrency.max(1))
            .inspect(|(_, outcome)| on_company(outcome))
            .collect()
            .await;

        outcomes.sort_by_key(|(idx, _)| *idx);
        let companies = outcomes.into_iter().map(|(_, outcome)| outcome).collect();

        Ok(AnalysisReport::new(
            self.source.label(),
            self.source.is_mock(),
            companies,
        ))
    }

    /// Analyse one INN.
    ///
    /// # Errors
    /// Returns `AnalysisError::Data` when the INN is invalid or a fetch fails,
    /// and `AnalysisError::MissingData` for the first requested period that
    /// has no report.
    pub async fn analyze_company(&self, inn: &str, periods: &[Period]) -> Result<CompanyAnalysis> {
        let inn = validate_inn(inn)?;
        let periods = prepare_periods(periods);
        let Some(&first) = periods.first() else {
            return Err(AnalysisError::NoPeriods);
        };

        let years: BTreeSet<i32> = periods.iter().map(|period| period.year).collect();
        let mut by_year = self.fetch_years(inn, &years).await?;

        // The prior period only feeds averaging; failing to fetch it is not fatal.
        let prior = self.config.prior_period(first);
        if let Some(period) = prior
            && !by_year.contains_key(&period.year)
        {
            match self.source.fetch_reports(inn, period.year).await {
                Ok(reports) => {
                    by_year.insert(period.year, reports);
                }
                Err(e) => {
                    warn!(inn, %period, error = %e, "prior period unavailable, not averaging");
                }
            }
        }

        let mut previous: Option<(Period, &RawReport)> = prior.and_then(|period| {
            let report = select(by_year.get(&period.year)?, period)?;
            debug!(inn, %period, "using prior period for averaging");
            Some((period, report))
        });

        let mut results = Vec::with_capacity(periods.len());
        for period in periods {
            let reports = by_year.get(&period.year).map_or(&[][..], Vec::as_slice);
            let current = select(reports, period).ok_or_else(|| AnalysisError::MissingData {
                inn: inn.to_string(),
                period,
            })?;

            results.push(PeriodMetrics {
                period,
                previous_period: previous.map(|(p, _)| p),
                metrics: calculate(current, previous.map(|(_, report)| report)),
            });
            previous = Some((period, current));
        }

        info!(inn, periods = results.len(), source = self.source.label(), "analysis complete");
        Ok(CompanyAnalysis {
            inn: inn.to_string(),
            source: self.source.label().to_string(),
            periods: results,
        })
    }

    async fn fetch_years(
        &self,
        inn: &str,
        years: &BTreeSet<i32>,
    ) -> Result<HashMap<i32, Vec<RawReport>>> {
        let fetches = years.iter().map(|&year| async move {
            let reports = self.source.fetch_reports(inn, year).await?;
            debug!(inn, year, reports = reports.len(), "fetched reports");
            Ok::<_, AnalysisError>((year, reports))
        });
        Ok(try_join_all(fetches).await?.into_iter().collect())
    }
}
