//! Terminal output utilities
//!
//! Results (checksums, versions, rendered templates) are printed directly by
//! the commands. These helpers cover the status lines around them; failures
//! and warnings go to stderr.

use console::{style, StyledObject};
use std::fmt::Display;

#[derive(Debug, Clone, Copy)]
enum Status {
    Done,
    Failed,
    Warning,
    Note,
}

impl Status {
    fn mark(self) -> StyledObject<&'static str> {
        match self {
            Self::Done => style("✓").green().bold(),
            Self::Failed => style("✗").red().bold(),
            Self::Warning => style("⚠").yellow().bold(),
            Self::Note => style("ℹ").blue().bold(),
        }
    }

    fn to_stderr(self) -> bool {
        matches!(self, Self::Failed | Self::Warning)
    }
}

fn emit(status: Status, msg: impl Display) {
    if status.to_stderr() {
        eprintln!("{} {}", status.mark(), msg);
    } else {
        println!("{} {}", status.mark(), msg);
    }
}

pub fn success(msg: impl Display) {
    emit(Status::Done, msg);
}

pub fn error(msg: impl Display) {
    emit(Status::Failed, msg);
}

pub fn warning(msg: impl Display) {
    emit(Status::Warning, msg);
}

pub fn info(msg: impl Display) {
    emit(Status::Note, msg);
}

/// Section title, e.g. one per dependency environment
pub fn header(msg: impl Display) {
    println!("\n{}", style(msg).bold().underlined());
}

/// A command shown by `--dry-run` instead of being executed
pub fn planned(cmd: impl Display) {
    println!("  {} {}", style("$").dim(), cmd);
}
