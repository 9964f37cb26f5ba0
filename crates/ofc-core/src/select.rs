//! Selection of the report for a requested period.

use crate::period::{Period, detect_period};
use serde_json::Value;
use tracing::debug;

/// Pick the report for `target` out of a report collection.
///
/// A quarterly target matches only a report with the same year and quarter;
/// the first match wins. An annual target prefers a report of that year with
/// no quarter. When the year only has quarterly reports, the one with the
/// highest quarter is returned as the closest available snapshot.
pub fn select(reports: &[Value], target: Period) -> Option<&Value> {
    let mut same_year = reports.iter().filter_map(|report| {
        let detected = detect_period(report);
        (detected.year == Some(target.year)).then_some((report, detected.quarter))
    });

    if let Some(quarter) = target.quarter {
        return same_year
            .find(|(_, detected)| *detected == Some(quarter))
            .map(|(report, _)| report);
    }

    let mut latest_quarterly: Option<(&Value, u8)> = None;
    for (report, quarter) in same_year {
        match quarter {
            None => return Some(report),
            Some(q) if latest_quarterly.is_none_or(|(_, best)| q > best) => {
                latest_quarterly = Some((report, q));
            }
            Some(_) => {}
        }
    }

    if let Some((_, quarter)) = latest_quarterly {
        debug!(
            year = target.year,
            quarter, "no annual report, using latest quarterly report"
        );
    }
    latest_quarterly.map(|(report, _)| report)
}
