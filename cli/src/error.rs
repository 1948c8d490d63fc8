use playbook_report_core::api::DecodeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(String),
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("cannot open {path}: {source}")]
    Input {
        path: String,
        source: std::io::Error,
    },
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json output failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        // 0: success
        // 1: stream could not be decoded
        // 2: a host failed or was unreachable (returned as a normal exit code, not as an error)
        // 11: config error
        // 20: IO error
        // 50: internal/uncategorized
        match self {
            CliError::Config(_) => 11,
            CliError::Decode(DecodeError::Io(_)) => 20,
            CliError::Decode(_) => 1,
            CliError::Logging(_) | CliError::Input { .. } | CliError::Io(_) => 20,
            CliError::Json(_) => 50,
        }
    }
}
