mod json;
mod traits;

pub use json::JsonResultsSink;
pub use traits::ResultsSink;
