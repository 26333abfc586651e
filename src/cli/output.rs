//! Output formatting
//!
//! Log verbosity, the error display used by `main`, and the run summary.
//! Build tools write straight to the terminal, so nothing here draws
//! spinners or progress bars over their output.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

use crate::config::defaults::DEFAULT_LOG_LEVEL;
use crate::core::builder::BuildReport;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";

    /// Warning prefix (yellow triangle)
    pub const WARNING: &str = "⚠";
}

/// Output settings derived from the global flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputConfig {
    /// Only warnings and errors
    pub quiet: bool,
    /// Verbosity count from `-v`
    pub verbose: u8,
}

impl OutputConfig {
    pub fn new(quiet: bool, verbose: u8) -> Self {
        Self { quiet, verbose }
    }

    /// Log level used when `RUST_LOG` is unset
    pub fn level(&self) -> &'static str {
        if self.quiet {
            return "warn";
        }
        match self.verbose {
            0 => DEFAULT_LOG_LEVEL,
            1 => "debug",
            _ => "trace",
        }
    }

    /// Install the global tracing subscriber, writing to stderr
    pub fn init_tracing(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(self.level()));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(false)
            .without_time()
            .init();
    }
}

/// Print an error and its cause chain to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}

/// One-line summary of a successful run
pub fn summary_line(report: &BuildReport) -> String {
    let mut line = format!("{} Built {} app(s)", status::SUCCESS, report.built());

    let skipped = report.skipped();
    if skipped > 0 {
        line.push_str(&format!(", skipped {skipped} without a build command"));
    }

    let warnings = report.artifact_warnings();
    if warnings > 0 {
        line.push_str(&format!(
            " ({} {warnings} missing artifact(s))",
            status::WARNING
        ));
    }

    line
}
