use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Conclusion value the API reports for a run that finished successfully.
const SUCCESS_CONCLUSION: &str = "success";

/// One workflow run as returned by the GitHub API.
///
/// Only the fields the tool actually reads are typed; everything else the API
/// sends is preserved verbatim in [`RunRecord::extra`] so that persisting a
/// collection and reading it back reproduces the same records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryInfo>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// The repository a run belongs to, with only the name field typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RunRecord {
    /// Whether the run finished with a successful conclusion.
    ///
    /// Anything other than the success sentinel, including a missing or null
    /// conclusion, counts as a failure.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.conclusion.as_deref() == Some(SUCCESS_CONCLUSION)
    }

    /// Run duration in seconds, or `None` when either timestamp is missing.
    #[must_use]
    pub fn duration_secs(&self) -> Option<f64> {
        let start = self.run_started_at?;
        let end = self.updated_at?;
        Some((end - start).as_seconds_f64())
    }

    /// The repository's `full_name`, if the record carries one.
    #[must_use]
    pub fn repo_name(&self) -> Option<&str> {
        self.repository.as_ref()?.full_name.as_deref()
    }
}
