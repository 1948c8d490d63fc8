use std::path::PathBuf;

use clap::Parser;
use playbook_report_core::api::StatsFold;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoldArg {
    Replace,
    Sum,
}

impl From<FoldArg> for StatsFold {
    fn from(v: FoldArg) -> Self {
        match v {
            FoldArg::Replace => StatsFold::Replace,
            FoldArg::Sum => StatsFold::Sum,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "playbook-report",
    version,
    about = "Merge, render and check ansible-playbook json callback output"
)]
pub struct Args {
    /// Captured output to read. Stdin when omitted or `-`.
    #[arg(long, short)]
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Config file. Defaults to ./playbook-report.toml when present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// How host counters from later documents combine with earlier ones.
    /// Overrides the config file.
    #[arg(long, value_enum)]
    pub stats_fold: Option<FoldArg>,

    /// Always exit 0 after printing, even if a host failed or was unreachable.
    #[arg(long)]
    pub no_check: bool,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn reads_stdin(&self) -> bool {
        self.input
            .as_deref()
            .map(|p| p.as_os_str() == "-")
            .unwrap_or(true)
    }
}
