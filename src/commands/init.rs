use camino::Utf8PathBuf;
use clap::Parser;
use gha_report::Result;
use gha_report::config::{Config, DEFAULT_CONFIG_TOML};
use ohno::IntoAppError;
use std::fs;

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output configuration file path
    #[arg(value_name = "PATH", default_value = "runs.toml")]
    pub output: Utf8PathBuf,
}

pub fn init_config(args: &InitArgs) -> Result<()> {
    // The TOML rendition keeps the embedded comments; other formats are
    // serialized from the default profile.
    if args.output.extension() == Some("toml") {
        fs::write(&args.output, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing configuration to {}", args.output))?;
    } else {
        Config::default().save(&args.output)?;
    }

    println!("Generated default configuration file: {}", args.output);
    Ok(())
}
