#![allow(dead_code)]

use playbook_report_core::api::{parse_results_stream_with, MergeConfig, PlaybookResults};

pub const THREE_DOCUMENTS: &str = include_str!("../fixtures/three_documents.json");
pub const SKIPPING_AND_FAILING: &str = include_str!("../fixtures/skipping_and_failing.json");
pub const NESTED_STDOUT_LINES: &str = include_str!("../fixtures/nested_stdout_lines.json");

pub fn merge_str(input: &str) -> PlaybookResults {
    parse_results_stream_with(input.as_bytes(), &MergeConfig::default())
        .expect("stream should merge")
}

pub fn merge_str_chunked(input: &str, chunk: usize) -> PlaybookResults {
    let cfg = MergeConfig {
        read_chunk_bytes: chunk,
        ..Default::default()
    };
    parse_results_stream_with(input.as_bytes(), &cfg).expect("stream should merge")
}

pub fn play_names(results: &PlaybookResults) -> Vec<&str> {
    results
        .plays
        .iter()
        .map(|p| p.play.as_ref().map(|x| x.name.as_str()).unwrap_or(""))
        .collect()
}

pub fn task_messages(results: &PlaybookResults) -> Vec<String> {
    results
        .plays
        .iter()
        .flat_map(|p| p.tasks.iter())
        .flat_map(|t| t.hosts.values())
        .map(|o| o.message())
        .collect()
}
