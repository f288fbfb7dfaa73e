//! Fetching workflow runs from the GitHub API.
//!
//! The pieces here form a strictly sequential pipeline: a [`Client`]
//! (authorized by a [`Credentials`] capability) pulls one page of runs at a
//! time, [`collect_runs`] drives the page loop while respecting the API rate
//! limit, and [`save_runs`]/[`load_runs`] persist the accumulated collection
//! as the hand-off artifact for the summarize phase.

mod auth;
mod client;
mod collector;
mod store;

pub use auth::{BearerToken, Credentials, TOKEN_ENV_VAR};
pub use client::{Client, RateLimitStatus};
pub use collector::{RATE_LIMIT_SKEW_MARGIN, collect_runs, rate_limit_backoff};
pub use store::{load_runs, save_runs};
