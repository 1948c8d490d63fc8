mod load;
mod types;

pub use load::{load_default, load_from_path, validate, DEFAULT_CONFIG_FILE};
pub use types::{LoggingConfig, MergeConfig, ReportConfig, StatsFold};
