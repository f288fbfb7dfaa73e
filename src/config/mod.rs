//! Configuration file handling.

#[expect(clippy::module_inception, reason = "matches the module layout of the sibling modules")]
mod config;

pub use config::{Config, DEFAULT_CONFIG_TOML, MAX_PAGE_SIZE, Profile};
