//! Stable re-exports for consumers (`cli` and external crates).
//!
//! Prefer importing from `playbook_report_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_from_path, LoggingConfig, MergeConfig, ReportConfig, StatsFold,
};
pub use crate::decode::parse_document;
pub use crate::error::{DecodeError, StatsError};
pub use crate::merge::{
    fold_into, merge_documents, parse_results_stream, parse_results_stream_async,
    parse_results_stream_async_with, parse_results_stream_with,
};
pub use crate::model::{
    Duration, FailedOutcome, FieldValue, HostStats, Play, PlayItem, PlaybookResults, Task,
    TaskHostOutcome, TaskItem,
};
pub use crate::sink::{JsonResultsSink, ResultsSink};

/// A fresh live sink with default merge settings, boxed for callers that hold
/// sinks behind the trait.
pub fn new_results_sink() -> Box<dyn ResultsSink> {
    Box::new(JsonResultsSink::new())
}
