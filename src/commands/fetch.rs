use super::common::{LogLevel, init_logging};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use core::time::Duration;
use gha_report::Result;
use gha_report::config::Config;
use gha_report::fetch::{BearerToken, Client, collect_runs, save_runs};
use indicatif::ProgressBar;

#[derive(Parser, Debug)]
pub struct FetchArgs {
    /// Configuration profile selecting the repository and paging parameters
    #[arg(long, short = 'p', value_name = "NAME", default_value = "default")]
    pub profile: String,

    /// Output file for the fetched run collection
    #[arg(long, short = 'o', value_name = "PATH", default_value = "runs.json")]
    pub output: Utf8PathBuf,

    /// Time (in seconds) to wait between page fetches
    #[arg(long, short = 's', value_name = "SECONDS", default_value_t = 1)]
    pub sleep_interval: u64,

    /// Path to configuration file [default: one of runs.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,
}

pub async fn fetch_runs(args: &FetchArgs) -> Result<()> {
    init_logging(args.log_level);

    let (config, warnings) = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    if !warnings.is_empty() {
        eprintln!("\n⚠️  Configuration validation warnings:");
        for warning in &warnings {
            eprintln!("   {warning}");
        }
        eprintln!();
    }

    let profile = config.profile(&args.profile)?;

    // The credential check happens before any network traffic.
    let credentials = BearerToken::from_env()?;
    let client = Client::new(&credentials, profile.api_url.clone())?;

    // The progress bar would interleave badly with log output, so it only
    // appears when logging is off.
    let bar = if args.log_level == LogLevel::None {
        ProgressBar::new(u64::from(profile.max_pages))
    } else {
        ProgressBar::hidden()
    };

    let delay = Duration::from_secs(args.sleep_interval);
    let runs = collect_runs(&client, profile, delay, |_, _| bar.inc(1)).await?;
    bar.finish_and_clear();

    save_runs(&runs, &args.output)?;
    println!("Saved {} runs to {}", runs.len(), args.output);
    Ok(())
}
