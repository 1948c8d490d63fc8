//! Decoding, merging, classification and rendering of `ansible-playbook` output
//! produced by the `json` stdout callback.
//!
//! The callback may print several complete JSON documents back to back on one
//! stream. [`merge::parse_results_stream`] (or a live [`sink::JsonResultsSink`])
//! folds them into a single [`model::PlaybookResults`], which can then be checked
//! with [`model::PlaybookResults::check_stats`] and printed with its `Display` impl.

pub mod api;
pub mod classify;
pub mod config;
pub mod decode;
pub mod error;
pub mod merge;
pub mod model;
pub mod render;
pub mod sink;
