//! Terminal progress rendering and error display.

use colored::Colorize;
use gangplank_plugin::StatusReporter;

/// Renders engine progress to stderr so stdout stays parseable JSON.
#[derive(Debug, Default)]
pub struct TermReporter;

impl StatusReporter for TermReporter {
    fn update(&self, message: &str) {
        eprintln!("{} {}", "...".dimmed(), message);
    }

    fn ok(&self, message: &str) {
        eprintln!("{} {}", "ok:".green().bold(), message);
    }

    fn warn(&self, message: &str) {
        eprintln!("{} {}", "warning:".yellow().bold(), message);
    }
}

/// Print an error in a user-friendly format.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "Error:".red().bold(), err);

    let network_failure = err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<gangplank_nomad::NomadError>(),
            Some(gangplank_nomad::NomadError::Network(_))
        )
    });
    if network_failure {
        eprintln!(
            "\n{}",
            "Hint: Check NOMAD_ADDR and your network connection.".yellow()
        );
    }
}
