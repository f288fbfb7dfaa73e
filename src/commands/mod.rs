mod common;
mod fetch;
mod init;
mod summarize;

pub use fetch::{FetchArgs, fetch_runs};
pub use init::{InitArgs, init_config};
pub use summarize::{SummarizeArgs, summarize_runs};
