//! The paginated fetch loop.

use crate::Result;
use crate::config::Profile;
use crate::fetch::Client;
use crate::runs::RunRecord;
use chrono::Utc;
use core::time::Duration;

const LOG_TARGET: &str = "     fetch";

/// Fixed margin added to every rate-limit backoff. Guards against clock skew
/// between the client and the server's advertised reset time.
pub const RATE_LIMIT_SKEW_MARGIN: Duration = Duration::from_secs(5);

/// How long to sleep when the quota is exhausted: time until `reset` plus the
/// skew margin. A reset already in the past clamps to the margin alone.
#[must_use]
pub fn rate_limit_backoff(reset: i64, now: i64) -> Duration {
    Duration::from_secs(u64::try_from(reset - now).unwrap_or(0)) + RATE_LIMIT_SKEW_MARGIN
}

/// Fetch all pages the profile asks for, in order, and return the accumulated
/// collection.
///
/// For each page the loop probes the rate-limit endpoint first and blocks
/// until the quota resets when it reads zero; the page request itself is then
/// issued at most once. Any request failure aborts the whole operation —
/// there is no partial-result path. After every page the loop sleeps `delay`
/// unconditionally to self-throttle.
///
/// An empty page does not terminate the loop early: exactly
/// `profile.max_pages` page requests are issued unless one fails.
/// `on_page` is invoked after each page with its index and record count.
pub async fn collect_runs(
    client: &Client,
    profile: &Profile,
    delay: Duration,
    mut on_page: impl FnMut(u32, usize),
) -> Result<Vec<RunRecord>> {
    let mut runs = Vec::new();

    for page in 1..=profile.max_pages {
        let quota = client.rate_limit().await?;
        if quota.remaining == 0 {
            let wait = rate_limit_backoff(quota.reset, Utc::now().timestamp());
            log::info!(target: LOG_TARGET, "Rate limit exhausted, sleeping for {}s until it resets", wait.as_secs());
            tokio::time::sleep(wait).await;
        }

        log::info!(target: LOG_TARGET, "Fetching page {page}/{}", profile.max_pages);
        let page_runs = client.workflow_runs(&profile.repo, profile.page_size, page).await?;
        log::debug!(target: LOG_TARGET, "Page {page} returned {} run(s)", page_runs.len());

        on_page(page, page_runs.len());
        runs.extend(page_runs);

        tokio::time::sleep(delay).await;
    }

    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_with_future_reset() {
        let wait = rate_limit_backoff(1_000_060, 1_000_000);
        assert_eq!(wait, Duration::from_secs(65));
    }

    #[test]
    fn test_backoff_with_past_reset_clamps_to_margin() {
        let wait = rate_limit_backoff(999_000, 1_000_000);
        assert_eq!(wait, RATE_LIMIT_SKEW_MARGIN);
    }

    #[test]
    fn test_backoff_at_reset_instant() {
        let wait = rate_limit_backoff(1_000_000, 1_000_000);
        assert_eq!(wait, RATE_LIMIT_SKEW_MARGIN);
    }
}
