//! Canonical text form of [`PlaybookResults`].
//!
//! Task lines come first, in play/task order with hosts sorted, followed by one
//! block per host in `stats`. The output is byte-stable for a given value.

use std::fmt;

use crate::model::{HostStats, PlaybookResults};

impl fmt::Display for HostStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            " Changed: {} Failures: {} Ignored: {} Ok: {} Rescued: {} Skipped: {} Unreachable: {}",
            self.changed,
            self.failures,
            self.ignored,
            self.ok,
            self.rescued,
            self.skipped,
            self.unreachable
        )
    }
}

impl fmt::Display for PlaybookResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for play in &self.plays {
            for task in &play.tasks {
                for (host, outcome) in &task.hosts {
                    writeln!(f, "[{host}] ({})\t{}", task.name(), outcome.message())?;
                }
            }
        }

        for (host, stats) in &self.stats {
            write!(f, "\nHost: {host}\n{stats}\n")?;
        }

        Ok(())
    }
}

impl PlaybookResults {
    pub fn render(&self) -> String {
        self.to_string()
    }
}
