use thiserror::Error;

/// Verdict raised by [`PlaybookResults::check_stats`](crate::model::PlaybookResults::check_stats).
///
/// Messages are matched verbatim by callers, "unrecheable" included.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("Host {host} finished with {failures} failures")]
    Failures { host: String, failures: u64 },

    #[error("Host {host} finished with {unreachable} unrecheable hosts")]
    Unreachable { host: String, unreachable: u64 },
}

impl StatsError {
    pub fn host(&self) -> &str {
        match self {
            StatsError::Failures { host, .. } | StatsError::Unreachable { host, .. } => host,
        }
    }
}
