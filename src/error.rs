// src/error.rs

use thiserror::Error;

/// Everything that can abort processing of a change batch.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Invalid dataset identifier '{0}': expected '<group>/<name>'")]
    InvalidDatasetId(String),
    #[error("Changed row for dataset '{dataset}' has no 'id' field")]
    MissingRowId { dataset: String },
    #[error("Changed row for dataset '{dataset}' has a non-numeric id: {value}")]
    InvalidRowId { dataset: String, value: String },
    #[error("Table for dataset '{dataset}' has no header/separator rows")]
    MalformedTable { dataset: String },
    #[error("Table source returned HTTP {status} for {url}")]
    UpstreamStatus { url: String, status: u16 },
    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),
    #[error("Environment variable {0} is not set")]
    MissingCredential(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BotResult<T> = Result<T, BotError>;

impl BotError {
    /// True for failures caused by the shape of the incoming batch.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            BotError::InvalidDatasetId(_)
                | BotError::MissingRowId { .. }
                | BotError::InvalidRowId { .. }
                | BotError::MalformedTable { .. }
        )
    }
}
