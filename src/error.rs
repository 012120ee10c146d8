use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Short read from {path}: expected {expected} bytes, got {actual}")]
    ShortRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("Malformed number '{value}' at byte {offset}")]
    MalformedNumber { value: String, offset: usize },

    #[error("Malformed line at byte {offset}: {reason}")]
    MalformedLine { offset: usize, reason: &'static str },

    #[error("Station name at byte {offset} is {length} bytes long (maximum {max})")]
    KeyTooLong {
        offset: usize,
        length: usize,
        max: usize,
    },

    #[error("No measurements found, nothing to report")]
    EmptyResult,

    #[error("Worker count must be at least 1, got {0}")]
    InvalidWorkerCount(usize),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Profiler error: {0}")]
    Profiler(#[from] pprof::Error),

    #[error("Configuration source error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON write error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
