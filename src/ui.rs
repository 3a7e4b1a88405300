//! Terminal output. Standard output only ever carries the version.

use crate::domain::Version;
use console::style;

/// Format an error message for standard error
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Print an error message in red to standard error
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Print the resolved version, one line, to standard output
pub fn display_version(version: &Version) {
    println!("{}", version);
}
