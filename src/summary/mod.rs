//! Reducing a run collection into summary statistics.

mod stats;
mod summarize;

pub use stats::DurationStats;
pub use summarize::{RunSummary, UNKNOWN_REPO, summarize};
