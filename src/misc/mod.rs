//! Small helpers shared between the CLI and the report generators.

use clap::ValueEnum;
use std::io::{IsTerminal, stdout};

/// Controls when console output is colorized
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Resolve the mode against the state of stdout.
    #[must_use]
    pub fn should_colorize(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => stdout().is_terminal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_always_and_never() {
        assert!(ColorMode::Always.should_colorize());
        assert!(!ColorMode::Never.should_colorize());
    }
}
