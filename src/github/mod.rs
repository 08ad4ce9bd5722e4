// src/github/mod.rs
//! External collaborators: where current tables come from and where the
//! rendered report goes.
//!
//! The patcher only sees the two traits below. The GitHub-backed implementations
//! are used by the server; the directory source backs offline `render` runs.

mod directory;
mod issues;
mod raw;

pub use directory::DirectoryTableSource;
pub use issues::GithubIssueSink;
pub use raw::GithubRawSource;

use async_trait::async_trait;
use serde_json::Value;

use crate::batch::DatasetId;
use crate::error::BotResult;
use crate::json_text;

/// Provides the current markdown text of a leaderboard.
#[async_trait]
pub trait TableSource: Send + Sync {
    async fn fetch(&self, dataset: &DatasetId) -> BotResult<String>;
}

/// Accepts a finished report as a new issue.
#[async_trait]
pub trait IssueSink: Send + Sync {
    async fn submit(&self, title: &str, body: &str) -> BotResult<SubmitResponse>;
}

/// Raw answer of the issue API.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitResponse {
    pub status: u16,
    pub body: Value,
}

impl SubmitResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses a response body as JSON, keeping non-JSON text as a JSON string.
    pub fn from_text(status: u16, text: String) -> Self {
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self { status, body }
    }

    /// The body serialized back to one line, keys in the order the API sent them.
    pub fn body_text(&self) -> BotResult<String> {
        json_text::to_spaced(&self.body)
    }
}
