use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReceiptError {
    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse settings file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to parse receipt config {path}: {source}")]
    RequestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid receipt details: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Invalid date range: end date {end} is before start date {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Failed to generate PDF: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),
}

impl ReceiptError {
    /// Errors the user can fix by correcting their input.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            ReceiptError::Validation(_) | ReceiptError::InvalidRange { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
