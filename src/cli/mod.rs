// src/cli/mod.rs
// Command-line entrypoints: the HTTP server and offline report rendering

pub mod render;
pub mod serve;

use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::config::{
    BotConfig, RepoCoordinates, ServerConfig, DEFAULT_API_BASE, DEFAULT_BIND, DEFAULT_BRANCH,
    DEFAULT_ISSUE_TITLE, DEFAULT_RAW_BASE, DEFAULT_REPO_NAME, DEFAULT_REPO_OWNER,
    DEFAULT_TOKEN_ENV,
};
use crate::error::BotResult;

#[derive(Parser, Debug)]
#[command(name = "leaderboard-bot")]
#[command(about = "Leaderboard bot - turns proposed leaderboard edits into GitHub issues", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Repository and issue settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Owner of the leaderboard repository
    #[arg(long, global = true, env = "LEADERBOARD_REPO_OWNER", default_value = DEFAULT_REPO_OWNER)]
    pub owner: String,

    /// Name of the leaderboard repository
    #[arg(long, global = true, env = "LEADERBOARD_REPO_NAME", default_value = DEFAULT_REPO_NAME)]
    pub repo: String,

    /// Branch the current leaderboards are read from
    #[arg(long, global = true, env = "LEADERBOARD_BRANCH", default_value = DEFAULT_BRANCH)]
    pub branch: String,

    /// Base URL of the GitHub REST API
    #[arg(long, global = true, env = "LEADERBOARD_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Base URL for raw file downloads
    #[arg(long, global = true, env = "LEADERBOARD_RAW_BASE", default_value = DEFAULT_RAW_BASE)]
    pub raw_base: String,

    /// Environment variable holding the GitHub token
    #[arg(long, global = true, default_value = DEFAULT_TOKEN_ENV)]
    pub token_env: String,

    /// Title of the created issues
    #[arg(long, global = true, env = "LEADERBOARD_ISSUE_TITLE", default_value = DEFAULT_ISSUE_TITLE)]
    pub issue_title: String,

    /// Attempts for the issue submission when the API cannot be reached
    #[arg(long, global = true, env = "LEADERBOARD_SUBMIT_ATTEMPTS", default_value_t = 1)]
    pub submit_attempts: u32,

    /// Answer `success` even when the issue API rejects the submission
    #[arg(long, global = true, env = "LEADERBOARD_ALWAYS_REPORT_SUCCESS")]
    pub always_report_success: bool,
}

impl RepoArgs {
    pub fn to_config(&self) -> BotConfig {
        BotConfig {
            repo: RepoCoordinates {
                owner: self.owner.clone(),
                name: self.repo.clone(),
                branch: self.branch.clone(),
            },
            api_base: self.api_base.clone(),
            raw_base: self.raw_base.clone(),
            token_env: self.token_env.clone(),
            issue_title: self.issue_title.clone(),
            submit_attempts: self.submit_attempts,
            always_report_success: self.always_report_success,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default when no subcommand is given)
    Serve {
        /// Address to listen on
        #[arg(long, env = "LEADERBOARD_BIND", default_value = DEFAULT_BIND)]
        bind: SocketAddr,

        /// Allowed CORS origin; repeat for several. Defaults to the local dev servers
        #[arg(long = "origin")]
        origins: Vec<String>,
    },

    /// Print the issue body for a batch file without opening an issue
    Render {
        /// Path to a change batch in JSON
        batch: PathBuf,

        /// Read leaderboards from this local checkout instead of GitHub
        #[arg(long)]
        tables_dir: Option<PathBuf>,
    },
}

/// Dispatches the parsed command line.
pub async fn run(cli: Cli) -> BotResult<()> {
    let config = cli.repo.to_config();
    match cli.command {
        None => serve::run(config, ServerConfig::default()).await,
        Some(Commands::Serve { bind, origins }) => {
            let mut server = ServerConfig {
                bind,
                ..ServerConfig::default()
            };
            if !origins.is_empty() {
                server.allowed_origins = origins;
            }
            serve::run(config, server).await
        }
        Some(Commands::Render { batch, tables_dir }) => {
            render::run(&config, &batch, tables_dir.as_deref()).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_render_with_repo_overrides() {
        let cli = Cli::try_parse_from([
            "leaderboard-bot",
            "render",
            "batch.json",
            "--tables-dir",
            "boards",
            "--owner",
            "acme",
            "--submit-attempts",
            "3",
        ])
        .unwrap();
        let config = cli.repo.to_config();
        assert_eq!(config.repo.owner, "acme");
        assert_eq!(config.submit_attempts, 3);
        match cli.command {
            Some(Commands::Render { batch, tables_dir }) => {
                assert_eq!(batch, PathBuf::from("batch.json"));
                assert_eq!(tables_dir, Some(PathBuf::from("boards")));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn serve_collects_origins() {
        let cli = Cli::try_parse_from([
            "leaderboard-bot",
            "serve",
            "--bind",
            "127.0.0.1:9000",
            "--origin",
            "http://a.test",
            "--origin",
            "http://b.test",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve { bind, origins }) => {
                assert_eq!(bind.port(), 9000);
                assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
