//! Output formatting with TTY auto-detection.

use std::io::IsTerminal;

use clap::ValueEnum;
use colored::{ColoredString, Colorize};

/// Output format for the change report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-optimized: colors and summary lines
    #[default]
    Pretty,
    /// No colors, one path per line
    Plain,
    /// Machine-readable JSON change report
    Json,
}

impl OutputFormat {
    /// Resolve the output format, applying TTY auto-detection.
    ///
    /// If format is Pretty but stdout is not a TTY, returns Plain.
    pub fn resolve(self) -> Self {
        match self {
            OutputFormat::Pretty if !std::io::stdout().is_terminal() => OutputFormat::Plain,
            other => other,
        }
    }

    pub fn is_colored(self) -> bool {
        self == OutputFormat::Pretty
    }
}

/// Style for paths in pretty output.
pub fn style_path(path: &str, colored: bool) -> String {
    if colored {
        path.bold().to_string()
    } else {
        path.to_string()
    }
}

/// Style for error counts - red when colored.
pub fn style_error(text: &str, colored: bool) -> ColoredString {
    if colored { text.red() } else { text.normal() }
}
