use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipError {
    #[error("Malformed timestamp: {0}")]
    MalformedTimestamp(String),

    #[error("Invalid time range: start {start:?} must be before end {end:?}")]
    InvalidRange { start: Duration, end: Duration },

    #[error("Invalid caption interval: end {end:?} must be after start {start:?}")]
    InvalidInterval { start: Duration, end: Duration },

    #[error("No captions found in {0}")]
    EmptyTrack(String),

    #[error("Video cut failed: {0}")]
    VideoCut(String),

    #[error("Download failed: {0}")]
    Download(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClipError>;
