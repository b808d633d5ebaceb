//! Console presentation layer
//!
//! All build progress goes through the [`Reporter`] trait so the orchestrator
//! never prints directly. [`ConsoleReporter`] is the terminal implementation;
//! `--verbose` adds per-file detail and `--quiet` keeps only failures.

use console::Style;

use crate::bundler::BuildReport;
use crate::error::UnitIssue;
use crate::manifest::UnitKind;

/// Receives progress events from a build run
pub trait Reporter {
    /// Discovery of a unit kind is starting
    fn searching(&mut self, kind: UnitKind);

    /// A unit is being processed
    fn unit(&mut self, unit_path: &str);

    /// A problem or notice for the current unit
    fn issue(&mut self, issue: &UnitIssue);

    /// The current variant was not written
    fn not_updated(&mut self, rerun_command: &str);

    /// The current variant was written
    fn updated(&mut self, template: Option<&str>);

    /// Verbose-only detail line
    fn detail(&mut self, message: &str);

    /// End of a unit kind
    fn summary(&mut self, kind: UnitKind, report: &BuildReport);
}

/// Styled terminal output
#[derive(Debug, Default)]
pub struct ConsoleReporter {
    verbose: bool,
    quiet: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn format_issue(issue: &UnitIssue) -> String {
        let red = Style::new().red();
        let yellow = Style::new().yellow();
        match issue {
            UnitIssue::MissingFile { list, file } => format!(
                "{} ({}): {file}",
                red.apply_to("File not found"),
                yellow.apply_to(list)
            ),
            UnitIssue::Invalid { message } => {
                format!("{}: {message}", red.apply_to("Invalid manifest"))
            }
            UnitIssue::ConfigPairing { message } => {
                format!("{}: {message}", red.apply_to("Configuration error"))
            }
            notice if !notice.blocks_write() => yellow.apply_to(notice.to_string()).to_string(),
            other => red.apply_to(other.to_string()).to_string(),
        }
    }
}

impl Reporter for ConsoleReporter {
    fn searching(&mut self, kind: UnitKind) {
        if self.quiet {
            return;
        }
        println!(
            "\nsearching for {}...",
            Style::new().cyan().apply_to(kind.manifest_file_name())
        );
    }

    fn unit(&mut self, unit_path: &str) {
        if self.quiet {
            return;
        }
        println!("\n- {unit_path}");
    }

    fn issue(&mut self, issue: &UnitIssue) {
        if self.quiet && !issue.blocks_write() {
            return;
        }
        println!("{}", Self::format_issue(issue));
    }

    fn not_updated(&mut self, rerun_command: &str) {
        println!(
            "{}: Please fix the above errors and re-run with: {}",
            Style::new().red().apply_to("Bundle not updated"),
            Style::new().yellow().apply_to(rerun_command)
        );
    }

    fn updated(&mut self, template: Option<&str>) {
        if self.quiet {
            return;
        }
        let green = Style::new().green();
        match template {
            Some(name) => println!("{} ({name})", green.apply_to("bundle updated successfully")),
            None => println!("{}", green.apply_to("bundle updated successfully")),
        }
    }

    fn detail(&mut self, message: &str) {
        if self.verbose && !self.quiet {
            println!("  {}", Style::new().dim().apply_to(message));
        }
    }

    fn summary(&mut self, kind: UnitKind, report: &BuildReport) {
        if report.found == 0 {
            println!("{}\n", Style::new().red().apply_to(format!("No {} found", kind.plural())));
        } else if !self.quiet || report.failed > 0 {
            println!(
                "\nFound {} {}: {} updated, {} failed\n",
                report.found,
                kind.plural(),
                report.updated,
                report.failed
            );
        }
    }
}
