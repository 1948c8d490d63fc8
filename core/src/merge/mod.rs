mod fold;
mod stream;

pub use fold::{fold_into, merge_documents};
pub use stream::{
    parse_results_stream, parse_results_stream_async, parse_results_stream_async_with,
    parse_results_stream_with,
};
