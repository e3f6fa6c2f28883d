//! Line-oriented operator output
//!
//! Everything the operator reads goes through [`Console`]; diagnostics go
//! through `tracing` to stderr.

use crate::config::SweepConfig;
use std::fmt::Display;
use std::io::{self, Write};

/// Prefix on every line printed while mutations are suppressed
pub const DRY_RUN_PREFIX: &str = "(Dry-run)";

/// Writes one line per scan, decision and action
///
/// The prefix mode always comes from a [`SweepConfig`]; the sweep entry
/// points re-sync it with [`Console::follow`] so output and mutations agree.
pub struct Console<W: Write> {
    out: W,
    dry_run: bool,
}

impl Console<io::Stdout> {
    pub fn stdout(config: &SweepConfig) -> Self {
        Self::new(io::stdout(), config)
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W, config: &SweepConfig) -> Self {
        Self {
            out,
            dry_run: config.dry_run,
        }
    }

    /// Take the prefix mode from `config`
    pub fn follow(&mut self, config: &SweepConfig) {
        self.dry_run = config.dry_run;
    }

    /// Print a line, prefixed in dry-run mode
    pub fn line(&mut self, message: impl Display) {
        // A closed stdout must not abort a half-finished sweep
        let _ = if self.dry_run {
            writeln!(self.out, "{DRY_RUN_PREFIX} {message}")
        } else {
            writeln!(self.out, "{message}")
        };
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(dry_run: bool, lines: &[&str]) -> String {
        let mut console = Console::new(Vec::new(), &SweepConfig::new(dry_run));
        for line in lines {
            console.line(line);
        }
        String::from_utf8(console.into_inner()).unwrap()
    }

    #[test]
    fn dry_run_prefixes_every_line() {
        let out = render(true, &["Scanning Region: us-west-2", "  Deleting subnet subnet-1"]);
        assert_eq!(
            out,
            "(Dry-run) Scanning Region: us-west-2\n(Dry-run)   Deleting subnet subnet-1\n"
        );
    }

    #[test]
    fn live_run_is_unprefixed() {
        let out = render(false, &["Scanning Region: us-west-2"]);
        assert_eq!(out, "Scanning Region: us-west-2\n");
    }

    #[test]
    fn follow_switches_to_the_config_mode() {
        let mut console = Console::new(Vec::new(), &SweepConfig::new(false));
        console.line("before");
        console.follow(&SweepConfig::new(true));
        console.line("after");
        assert_eq!(
            String::from_utf8(console.into_inner()).unwrap(),
            "before\n(Dry-run) after\n"
        );
    }
}
