// src/github/issues.rs
//! Issue creation through the GitHub REST API.
//!
//! The bearer token is read from the environment on every submission, so a
//! missing token fails that request only and a token added later is picked up
//! without a restart.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{IssueSink, SubmitResponse};
use crate::config::{BotConfig, USER_AGENT};
use crate::error::{BotError, BotResult};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const RETRY_BACKOFF: Duration = Duration::from_millis(250);

#[derive(Debug, Serialize)]
struct CreateIssue<'a> {
    title: &'a str,
    body: &'a str,
}

pub struct GithubIssueSink {
    client: reqwest::Client,
    issues_url: String,
    token_env: String,
    attempts: u32,
}

impl GithubIssueSink {
    pub fn new(config: &BotConfig) -> BotResult<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &BotConfig) -> Self {
        Self {
            client,
            issues_url: config.issues_url(),
            token_env: config.token_env.clone(),
            attempts: config.submit_attempts.max(1),
        }
    }

    pub fn issues_url(&self) -> &str {
        &self.issues_url
    }

    fn token(&self) -> BotResult<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.is_empty() => Ok(token),
            _ => Err(BotError::MissingCredential(self.token_env.clone())),
        }
    }

    async fn post_once(&self, token: &str, payload: &CreateIssue<'_>) -> reqwest::Result<SubmitResponse> {
        let response = self
            .client
            .post(&self.issues_url)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .json(payload)
            .send()
            .await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(SubmitResponse::from_text(status, text))
    }
}

/// Failures where the request most likely never reached the API.
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

#[async_trait]
impl IssueSink for GithubIssueSink {
    async fn submit(&self, title: &str, body: &str) -> BotResult<SubmitResponse> {
        let token = self.token()?;
        let payload = CreateIssue { title, body };

        let mut attempt = 1;
        loop {
            match self.post_once(&token, &payload).await {
                Ok(response) => {
                    info!(status = response.status, url = %self.issues_url, "issue submitted");
                    return Ok(response);
                }
                Err(e) if attempt < self.attempts && is_transient(&e) => {
                    warn!(attempt, error = %e, "issue submission failed, retrying");
                    tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    attempt += 1;
                }
                Err(e) => {
                    debug!(attempt, error = ?e, "issue submission failed");
                    return Err(e.into());
                }
            }
        }
    }
}
