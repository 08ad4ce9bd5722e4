// src/cli/serve.rs

use tracing::info;

use crate::config::{BotConfig, ServerConfig};
use crate::error::BotResult;
use crate::server;
use crate::service::LeaderboardService;

pub async fn run(config: BotConfig, server: ServerConfig) -> BotResult<()> {
    info!(
        owner = %config.repo.owner,
        repo = %config.repo.name,
        branch = %config.repo.branch,
        "starting leaderboard bot"
    );
    if std::env::var_os(&config.token_env).is_none() {
        info!(var = %config.token_env, "token not set yet; submissions fail until it is");
    }
    let service = LeaderboardService::from_config(config)?;
    server::serve(service, server).await
}
