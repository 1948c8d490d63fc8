use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub merge: MergeConfig,
}

/// Diagnostics only. The report itself always goes to stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter string, e.g. "warn" or "playbook_report.merge=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Print diagnostics on stderr.
    #[serde(default = "default_logging_stderr")]
    pub stderr: bool,

    /// Also append diagnostics to this file, without colors.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_logging_level() -> String {
    "warn".to_string()
}

fn default_logging_stderr() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_logging_level(),
            stderr: default_logging_stderr(),
            file: None,
        }
    }
}

impl LoggingConfig {
    pub fn is_silent(&self) -> bool {
        !self.stderr && self.file.is_none()
    }

    /// Filter for a run with `verbose` `-v` flags. Each flag widens this crate's
    /// targets (`playbook_report*`) by one level; other crates keep `level`.
    pub fn filter_directive(&self, verbose: u8) -> String {
        match verbose {
            0 => self.level.clone(),
            1 => format!("{},playbook_report=info", self.level),
            2 => format!("{},playbook_report=debug", self.level),
            _ => format!("{},playbook_report=trace", self.level),
        }
    }
}

/// How a host's counters from a later document combine with what is already known.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsFold {
    /// The later document's counters replace the earlier ones. ansible prints running
    /// totals in every document, so this is the right choice for its json callback.
    #[default]
    Replace,
    /// Counters are added field by field, for producers that print per-document deltas.
    Sum,
}

impl std::str::FromStr for StatsFold {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "replace" | "last" => Ok(StatsFold::Replace),
            "sum" | "add" => Ok(StatsFold::Sum),
            other => Err(format!("unknown stats fold '{other}' (expected replace|sum)")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub stats_fold: StatsFold,

    /// Regexes for whole lines that may appear between documents and are dropped.
    #[serde(default = "default_skip_patterns")]
    pub skip_patterns: Vec<String>,

    #[serde(default = "default_read_chunk_bytes")]
    pub read_chunk_bytes: usize,
}

fn default_skip_patterns() -> Vec<String> {
    // profile_tasks / timer callbacks print this after the json callback's document.
    vec![
        r"^[\s\t]*Playbook run took [0-9]+ days, [0-9]+ hours, [0-9]+ minutes, [0-9]+ seconds$"
            .to_string(),
    ]
}

fn default_read_chunk_bytes() -> usize {
    64 * 1024
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            stats_fold: StatsFold::default(),
            skip_patterns: default_skip_patterns(),
            read_chunk_bytes: default_read_chunk_bytes(),
        }
    }
}
