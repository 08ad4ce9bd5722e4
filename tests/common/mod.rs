// tests/common/mod.rs
// In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use leaderboard_bot::batch::{ChangeBatch, DatasetId};
use leaderboard_bot::github::{IssueSink, SubmitResponse, TableSource};
use leaderboard_bot::{BotError, BotResult};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

/// Serves leaderboards from a map and records which datasets were fetched.
#[derive(Default)]
pub struct MemorySource {
    tables: HashMap<String, String>,
    fetched: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn with(mut self, dataset: &str, text: &str) -> Self {
        self.tables.insert(dataset.to_string(), text.to_string());
        self
    }

    pub fn fetched(&self) -> Vec<String> {
        let mut fetched = self.fetched.lock().unwrap().clone();
        fetched.sort();
        fetched
    }
}

#[async_trait]
impl TableSource for MemorySource {
    async fn fetch(&self, dataset: &DatasetId) -> BotResult<String> {
        let key = dataset.to_string();
        self.fetched.lock().unwrap().push(key.clone());
        self.tables
            .get(&key)
            .cloned()
            .ok_or(BotError::UpstreamStatus {
                url: format!("memory://{}", dataset.markdown_path()),
                status: 404,
            })
    }
}

/// Answers every submission with a fixed response and keeps what it was sent.
pub struct RecordingSink {
    status: u16,
    body: Value,
    submitted: Mutex<Vec<(String, String)>>,
}

impl RecordingSink {
    pub fn answering(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            submitted: Mutex::new(Vec::new()),
        }
    }

    pub fn created() -> Self {
        Self::answering(201, json!({"number": 1, "state": "open"}))
    }

    pub fn submitted(&self) -> Vec<(String, String)> {
        self.submitted.lock().unwrap().clone()
    }
}

#[async_trait]
impl IssueSink for RecordingSink {
    async fn submit(&self, title: &str, body: &str) -> BotResult<SubmitResponse> {
        self.submitted
            .lock()
            .unwrap()
            .push((title.to_string(), body.to_string()));
        Ok(SubmitResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

pub const MNIST: &str = "---\nlayout: leaderboard\n---\n| Model | Acc |\n|:--:|:--:|\n| cnn | 0.99 |\n| mlp | 0.97 |\n";

pub fn batch(raw: Value) -> ChangeBatch {
    let mut raw = raw;
    for key in ["newColumns", "newRows", "changedRows", "newLeaderboards"] {
        if raw.get(key).is_none() {
            raw[key] = json!([]);
        }
    }
    serde_json::from_value(raw).unwrap()
}
