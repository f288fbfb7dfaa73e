//! GitHub API client
//!
//! Minimal client for the two endpoints the tool uses: the rate-limit status
//! endpoint and the paginated workflow-runs listing.

use crate::Result;
use crate::fetch::Credentials;
use crate::runs::RunRecord;
use ohno::{IntoAppError, bail};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;

/// Media type GitHub asks clients to request explicitly.
const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// Core rate limit state as reported by the `/rate_limit` endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitStatus {
    /// Requests left in the current window.
    pub remaining: u64,

    /// Epoch seconds at which the window resets.
    pub reset: i64,
}

/// The `/rate_limit` response wraps the interesting part in a `rate` key.
#[derive(Debug, Deserialize)]
struct RateLimitEnvelope {
    rate: RateLimitStatus,
}

/// One page of the runs listing. A response without a `workflow_runs` key is
/// an empty page, not an error.
#[derive(Debug, Deserialize)]
struct RunsPage {
    #[serde(default)]
    workflow_runs: Vec<RunRecord>,
}

/// GitHub API client
#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Create a new client against `base_url`, authorized by `credentials`.
    pub fn new(credentials: &dyn Credentials, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON_MEDIA_TYPE));
        let _ = headers.insert(AUTHORIZATION, credentials.authorization()?);

        Ok(Self {
            client: reqwest::Client::builder()
                .user_agent("gha-report")
                .default_headers(headers)
                .build()?,
            base_url: base_url.into(),
        })
    }

    /// Get the base URL for this client
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query the current rate limit state. Never cached; callers probe fresh
    /// before every page request.
    pub async fn rate_limit(&self) -> Result<RateLimitStatus> {
        let url = format!("{}/rate_limit", self.base_url);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .into_app_err_with(|| format!("querying rate limit status at '{url}'"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("rate limit query to '{url}' failed with HTTP {status}");
        }

        let envelope: RateLimitEnvelope = resp
            .json()
            .await
            .into_app_err_with(|| format!("parsing rate limit response from '{url}'"))?;
        Ok(envelope.rate)
    }

    /// Fetch one page of workflow runs for `repo`.
    ///
    /// Any non-success status is an error; the fetch loop treats it as fatal.
    pub async fn workflow_runs(&self, repo: &str, per_page: u32, page: u32) -> Result<Vec<RunRecord>> {
        let url = format!("{}/repos/{repo}/actions/runs", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("per_page", per_page), ("page", page)])
            .send()
            .await
            .into_app_err_with(|| format!("requesting workflow runs from '{url}'"))?;

        let status = resp.status();
        if !status.is_success() {
            bail!("could not get workflow information: page {page} of '{url}' failed with HTTP {status}");
        }

        let body: RunsPage = resp
            .json()
            .await
            .into_app_err_with(|| format!("parsing workflow runs from '{url}'"))?;
        Ok(body.workflow_runs)
    }
}
