use crate::Result;
use crate::runs::RunRecord;
use crate::summary::DurationStats;
use ohno::bail;
use serde::Serialize;

const LOG_TARGET: &str = "   summary";

/// Placeholder used when the first record carries no repository name.
pub const UNKNOWN_REPO: &str = "Unknown Repo";

/// Everything the reports need, reduced from a run collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub repo_name: String,
    pub total: usize,
    pub successes: usize,
    pub failures: usize,

    /// Percentage of successful runs, rounded to 1 decimal place.
    pub success_rate: f64,

    /// Percentage of failed runs, rounded to 1 decimal place.
    pub failure_rate: f64,

    pub durations: DurationStats,
}

/// Reduce a run collection into a [`RunSummary`].
///
/// A run counts as a success only when its conclusion equals the success
/// sentinel; everything else, including runs with no conclusion at all, is a
/// failure. Runs lacking a start or end timestamp are excluded from the
/// duration statistics but still count toward the totals and rates.
///
/// An empty collection is an error, as is a collection in which no run has a
/// defined duration.
pub fn summarize(runs: &[RunRecord]) -> Result<RunSummary> {
    if runs.is_empty() {
        bail!("cannot summarize an empty run collection");
    }

    let total = runs.len();
    let successes = runs.iter().filter(|run| run.is_success()).count();
    let failures = total - successes;

    let durations: Vec<f64> = runs.iter().filter_map(RunRecord::duration_secs).collect();
    let undefined = total - durations.len();
    if undefined > 0 {
        log::warn!(target: LOG_TARGET, "{undefined} run(s) lack timestamps and are excluded from duration statistics");
    }
    if durations.is_empty() {
        bail!("none of the {total} run(s) carry both timestamps, cannot compute duration statistics");
    }

    let repo_name = runs[0].repo_name().unwrap_or(UNKNOWN_REPO).to_string();

    #[expect(clippy::cast_precision_loss, reason = "run counts are far below f64 precision limits")]
    let success_rate = round1(100.0 * successes as f64 / total as f64);
    #[expect(clippy::cast_precision_loss, reason = "run counts are far below f64 precision limits")]
    let failure_rate = round1(100.0 * failures as f64 / total as f64);

    Ok(RunSummary {
        repo_name,
        total,
        successes,
        failures,
        success_rate,
        failure_rate,
        durations: DurationStats::compute(&durations)?,
    })
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
