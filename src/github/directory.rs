// src/github/directory.rs
// Reads leaderboards from a local checkout laid out as `<group>/<name>.md`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::TableSource;
use crate::batch::DatasetId;
use crate::error::BotResult;

pub struct DirectoryTableSource {
    root: PathBuf,
}

impl DirectoryTableSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, dataset: &DatasetId) -> PathBuf {
        self.root
            .join(dataset.group())
            .join(format!("{}.md", dataset.name()))
    }
}

#[async_trait]
impl TableSource for DirectoryTableSource {
    async fn fetch(&self, dataset: &DatasetId) -> BotResult<String> {
        Ok(tokio::fs::read_to_string(self.path_for(dataset)).await?)
    }
}
