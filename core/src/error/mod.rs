pub mod decode;
pub mod stats;

pub use decode::DecodeError;
pub use stats::StatsError;
