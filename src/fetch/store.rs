//! Persistence for fetched run collections.
//!
//! The JSON file written here is the sole hand-off artifact between the fetch
//! and summarize phases, so it is always pretty-printed (2-space indent) for
//! easy inspection, and written in a single pass.

use crate::Result;
use crate::runs::RunRecord;
use ohno::IntoAppError;
use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Save the full run collection to a file, pretty-printed.
pub fn save_runs(runs: &[RunRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).into_app_err_with(|| format!("unable to create directory '{}'", parent.display()))?;
    }

    let file = File::create(path).into_app_err_with(|| format!("unable to create output file '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, runs).into_app_err_with(|| format!("unable to write runs to '{}'", path.display()))?;
    writer
        .flush()
        .into_app_err_with(|| format!("unable to flush output file '{}'", path.display()))?;
    Ok(())
}

/// Load a previously saved run collection.
pub fn load_runs(path: impl AsRef<Path>) -> Result<Vec<RunRecord>> {
    let path = path.as_ref();

    let file = File::open(path).into_app_err_with(|| format!("unable to open runs file '{}'", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).into_app_err_with(|| format!("unable to parse runs file '{}'", path.display()))
}
