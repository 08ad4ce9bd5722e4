// src/service.rs
//! Request orchestration: validate, group, patch every dataset, render, submit.

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::batch::ChangeBatch;
use crate::config::BotConfig;
use crate::error::BotResult;
use crate::github::{GithubIssueSink, GithubRawSource, IssueSink, SubmitResponse, TableSource};
use crate::patcher::{apply_edits, group_by_dataset, render_report, validate_batch};

/// Result of one submitted batch.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub batch_id: Uuid,
    pub report: String,
    pub response: SubmitResponse,
}

/// Builds the full report for `batch` without submitting it.
///
/// Datasets are fetched and patched concurrently; the report keeps the order
/// in which datasets were first seen in the batch.
pub async fn build_report(source: &dyn TableSource, batch: &ChangeBatch) -> BotResult<String> {
    validate_batch(batch)?;
    let grouped = group_by_dataset(batch);
    debug!(datasets = grouped.len(), edits = batch.edit_count(), "batch grouped");

    let results = try_join_all(
        grouped
            .iter()
            .map(|(dataset, edits)| apply_edits(source, dataset, edits)),
    )
    .await?;
    render_report(&results, batch)
}

pub struct LeaderboardService {
    config: BotConfig,
    source: Arc<dyn TableSource>,
    sink: Arc<dyn IssueSink>,
}

impl LeaderboardService {
    pub fn new(config: BotConfig, source: Arc<dyn TableSource>, sink: Arc<dyn IssueSink>) -> Self {
        Self { config, source, sink }
    }

    /// Service backed by raw.githubusercontent.com and the GitHub issues API.
    pub fn from_config(config: BotConfig) -> BotResult<Self> {
        let source = Arc::new(GithubRawSource::new(&config)?);
        let sink = Arc::new(GithubIssueSink::new(&config)?);
        Ok(Self::new(config, source, sink))
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub async fn preview(&self, batch: &ChangeBatch) -> BotResult<String> {
        build_report(self.source.as_ref(), batch).await
    }

    /// Renders the batch and opens an issue with the report as its body.
    pub async fn submit(&self, batch: &ChangeBatch) -> BotResult<SubmissionOutcome> {
        let batch_id = Uuid::new_v4();
        let span = info_span!("batch", %batch_id);
        async move {
            info!(edits = batch.edit_count(), "processing change batch");
            let report = build_report(self.source.as_ref(), batch).await?;
            debug!(body = %report, "issue body rendered");

            let response = self.sink.submit(&self.config.issue_title, &report).await?;
            info!(status = response.status, "change batch submitted");
            Ok(SubmissionOutcome {
                batch_id,
                report,
                response,
            })
        }
        .instrument(span)
        .await
    }
}
