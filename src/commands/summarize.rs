use super::common::{LogLevel, init_logging};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use gha_report::Result;
use gha_report::fetch::load_runs;
use gha_report::misc::ColorMode;
use gha_report::reports::{generate_console, generate_html};
use gha_report::summary::summarize;
use ohno::{IntoAppError, bail};
use std::fs;

const LOG_TARGET: &str = " summarize";

const HTML_TITLE: &str = "GitHub Actions Dashboard";

#[derive(Parser, Debug)]
pub struct SummarizeArgs {
    /// Path to a .json file of previously fetched workflow runs
    #[arg(long, short = 'f', value_name = "PATH", default_value = "runs.json")]
    pub filename: Utf8PathBuf,

    /// Save the HTML report with this name
    #[arg(long, value_name = "PATH", default_value = "summary.html")]
    pub html: Utf8PathBuf,

    /// Do not open the HTML report in a browser
    #[arg(long)]
    pub no_browser: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

pub fn summarize_runs(args: &SummarizeArgs) -> Result<()> {
    init_logging(args.log_level);

    let runs = load_runs(&args.filename)?;
    if runs.is_empty() {
        bail!("no runs found in '{}'", args.filename);
    }

    let summary = summarize(&runs)?;

    let mut console_output = String::new();
    generate_console(&summary, args.color, &mut console_output)?;
    print!("{console_output}");

    let mut html = String::new();
    generate_html(&summary, HTML_TITLE, &mut html)?;
    fs::write(&args.html, html).into_app_err_with(|| format!("writing HTML report to {}", args.html))?;
    println!("\nHTML summary written to {}", args.html);

    if !args.no_browser {
        open_in_browser(&args.html);
    }

    Ok(())
}

/// Pop the report open in a browser for user convenience. Best effort: a
/// missing browser doesn't fail the run.
fn open_in_browser(path: &Utf8Path) {
    let url = match std::path::absolute(path) {
        Ok(abs) => format!("file://{}", abs.display()),
        Err(_) => path.to_string(),
    };

    if let Err(e) = webbrowser::open(&url) {
        log::warn!(target: LOG_TARGET, "Could not open '{url}' in a browser: {e}");
    }
}
