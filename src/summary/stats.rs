use crate::Result;
use ohno::bail;
use serde::Serialize;

/// Aggregate statistics over a sequence of run durations, in seconds.
///
/// Each value is rounded to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DurationStats {
    pub average: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

impl DurationStats {
    /// Compute statistics over `durations`.
    ///
    /// Callers must filter out undefined durations beforehand; an empty
    /// sequence is an error, never a silent NaN.
    pub fn compute(durations: &[f64]) -> Result<Self> {
        if durations.is_empty() {
            bail!("no durations to aggregate");
        }

        let mut sorted = durations.to_vec();
        sorted.sort_by(f64::total_cmp);

        #[expect(clippy::cast_precision_loss, reason = "run counts are far below f64 precision limits")]
        let average = sorted.iter().sum::<f64>() / sorted.len() as f64;

        Ok(Self {
            average: round2(average),
            median: round2(median_of_sorted(&sorted)),
            max: round2(sorted[sorted.len() - 1]),
            min: round2(sorted[0]),
        })
    }
}

/// Median of an already-sorted, non-empty slice. An even length averages the
/// two middle values.
fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
