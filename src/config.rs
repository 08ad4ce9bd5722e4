// src/config.rs
// Runtime settings injected into the collaborators and the HTTP server.

use std::net::SocketAddr;

pub const DEFAULT_REPO_OWNER: &str = "Artur-Galstyan";
pub const DEFAULT_REPO_NAME: &str = "leaderboard";
pub const DEFAULT_BRANCH: &str = "main";
pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";
pub const DEFAULT_ISSUE_TITLE: &str = "New changes";
pub const DEFAULT_BIND: &str = "0.0.0.0:8000";
pub const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:8080"];

pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The hosted repository that stores the leaderboards and receives issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoCoordinates {
    pub owner: String,
    pub name: String,
    pub branch: String,
}

impl Default for RepoCoordinates {
    fn default() -> Self {
        Self {
            owner: DEFAULT_REPO_OWNER.to_string(),
            name: DEFAULT_REPO_NAME.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    pub repo: RepoCoordinates,
    pub api_base: String,
    pub raw_base: String,
    /// Name of the environment variable holding the bearer token.
    pub token_env: String,
    pub issue_title: String,
    /// Total attempts for the issue submission, counting the first one.
    pub submit_attempts: u32,
    /// Report `success` even when the issue API rejected the submission.
    pub always_report_success: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            repo: RepoCoordinates::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            issue_title: DEFAULT_ISSUE_TITLE.to_string(),
            submit_attempts: 1,
            always_report_success: false,
        }
    }
}

impl BotConfig {
    /// `{raw_base}/{owner}/{repo}/{branch}`, the prefix for raw file downloads.
    pub fn raw_content_root(&self) -> String {
        format!(
            "{}/{}/{}/{}",
            self.raw_base.trim_end_matches('/'),
            self.repo.owner,
            self.repo.name,
            self.repo.branch
        )
    }

    pub fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_base.trim_end_matches('/'),
            self.repo.owner,
            self.repo.name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.parse().unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8000))),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|o| o.to_string()).collect(),
        }
    }
}
