//! Report generation for run summaries.
//!
//! Two generators are provided, each accessed through a `generate` function:
//! - **Console**: the fixed textual layout, with optional ANSI colors
//! - **HTML**: a self-contained document with embedded CSS, dark mode, and an
//!   inline SVG pie chart of success vs failure counts
//!
//! Both operate on the same input, a [`crate::summary::RunSummary`], and write
//! into any `core::fmt::Write` sink so callers decide where the text ends up.

mod console;
mod html;

pub use console::generate as generate_console;
pub use html::generate as generate_html;
