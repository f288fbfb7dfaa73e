//! A tool to fetch GitHub Actions workflow runs and summarize their outcomes.
//!
//! # Overview
//!
//! `gha-report` polls the GitHub REST API for a repository's workflow runs,
//! saves them to a JSON file, and turns that file into a console summary plus
//! a self-contained HTML dashboard. The two phases are independent commands
//! that communicate only through the saved file, so you can fetch once and
//! re-summarize as often as you like.
//!
//! # Quick Start
//!
//! Generate a configuration file, point it at your repository, and fetch:
//!
//! ```bash
//! gha-report init
//! $EDITOR runs.toml            # set repo = "owner/name"
//! export GITHUB_TOKEN=ghp_xxxxxxxxxxxxxxxxxxxx
//! gha-report fetch
//! gha-report summarize
//! ```
//!
//! `fetch` writes `runs.json`; `summarize` prints the statistics, writes
//! `summary.html`, and opens it in your browser.
//!
//! # Fetching
//!
//! The fetch loop walks the runs listing page by page. Before every page it
//! checks the API rate limit and, when the quota is exhausted, sleeps until
//! the limit resets (plus a small margin for clock skew). After every page it
//! sleeps a configurable interval to self-throttle. Any failed request aborts
//! the whole fetch; nothing is saved in that case.
//!
//! **Select a profile:**
//! ```bash
//! gha-report fetch --profile nightly
//! ```
//!
//! **Choose the output file and pacing:**
//! ```bash
//! gha-report fetch -o march.json --sleep-interval 2
//! ```
//!
//! # Summarizing
//!
//! ```bash
//! gha-report summarize --filename march.json --html march.html
//! ```
//!
//! The console summary shows success/failure counts and rates plus the
//! duration distribution (average, median, min, max). Runs whose records lack
//! timestamps are excluded from the duration statistics but still count
//! toward the totals. Pass `--no-browser` to skip opening the HTML report.
//!
//! # Configuration
//!
//! Configuration lives in `runs.toml` (or `.yml`/`.yaml`/`.json` — the first
//! one found wins, or pass `--config`). Each profile names a fetch target:
//!
//! ```toml
//! [profiles.default]
//! repo = "rust-lang/rust"
//! max_pages = 5
//! page_size = 100
//! api_url = "https://api.github.com"
//! ```
//!
//! Suspect values (a page size over the API's cap of 100, an invalid
//! `api_url`, …) produce warnings but don't stop the run.
//!
//! # GitHub Access
//!
//! Requests are authorized with a personal access token read from the
//! `GITHUB_TOKEN` environment variable; no special permissions are needed for
//! public repositories. Without the variable set, `fetch` exits immediately
//! with a pointer to GitHub's token documentation.
//!
//! # Troubleshooting
//!
//! - **`GITHUB_TOKEN is not set`** — create a token at
//!   <https://github.com/settings/tokens> and export it.
//! - **Rate limit pauses** — the tool waits automatically; authenticated
//!   tokens raise the limit from 60 to 5000 requests/hour.
//! - **`cannot summarize an empty run collection`** — the fetched repository
//!   has no workflow runs, or `max_pages`/`page_size` selected an empty
//!   window.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use gha_report::Result;

mod commands;

use crate::commands::{FetchArgs, InitArgs, SummarizeArgs, fetch_runs, init_config, summarize_runs};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "gha-report", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch workflow runs from the GitHub API and save them as JSON
    Fetch(FetchArgs),
    /// Summarize a saved run collection into console and HTML reports
    Summarize(SummarizeArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        Command::Fetch(args) => fetch_runs(args).await,
        Command::Summarize(args) => summarize_runs(args),
        Command::Init(args) => init_config(args),
    }
}
