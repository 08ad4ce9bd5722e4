// src/server.rs
//! HTTP surface: `POST /make_pull_request` behind a CORS allow-list.

use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::batch::ChangeBatch;
use crate::config::ServerConfig;
use crate::error::{BotError, BotResult};
use crate::service::LeaderboardService;

pub const SUBMIT_ROUTE: &str = "/make_pull_request";

#[derive(Clone)]
pub struct AppState {
    service: Arc<LeaderboardService>,
}

#[derive(Debug, Serialize)]
struct SubmitReply {
    status: &'static str,
    /// The issue API's JSON answer as one line of text.
    response: String,
}

#[derive(Debug, Serialize)]
struct ErrorReply {
    status: &'static str,
    error: String,
}

impl IntoResponse for BotError {
    fn into_response(self) -> Response {
        let status = match &self {
            e if e.is_invalid_input() => StatusCode::BAD_REQUEST,
            BotError::UpstreamStatus { .. } | BotError::Http(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!(error = %self, "change batch failed");
        } else {
            warn!(error = %self, "change batch rejected");
        }
        let reply = ErrorReply {
            status: "error",
            error: self.to_string(),
        };
        (status, Json(reply)).into_response()
    }
}

fn cors_layer(origins: &[String]) -> BotResult<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .map_err(|_| BotError::InvalidOrigin(o.clone()))
        })
        .collect::<BotResult<Vec<_>>>()?;
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request()))
}

pub fn router(service: Arc<LeaderboardService>, server: &ServerConfig) -> BotResult<Router> {
    let state = AppState { service };
    Ok(Router::new()
        .route(SUBMIT_ROUTE, post(make_pull_request))
        .layer(cors_layer(&server.allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

async fn make_pull_request(
    State(state): State<AppState>,
    Json(batch): Json<ChangeBatch>,
) -> Result<Response, BotError> {
    let outcome = state.service.submit(&batch).await?;
    let accepted = outcome.response.is_success();
    if !accepted {
        warn!(batch_id = %outcome.batch_id, status = outcome.response.status, "issue API rejected the submission");
    }

    let report_success = accepted || state.service.config().always_report_success;
    let reply = SubmitReply {
        status: if report_success { "success" } else { "error" },
        response: outcome.response.body_text()?,
    };
    let code = if report_success {
        StatusCode::OK
    } else {
        StatusCode::BAD_GATEWAY
    };
    Ok((code, Json(reply)).into_response())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

/// Binds the configured address and serves until ctrl-c.
pub async fn serve(service: LeaderboardService, server: ServerConfig) -> BotResult<()> {
    let app = router(Arc::new(service), &server)?;
    let listener = tokio::net::TcpListener::bind(server.bind).await?;
    info!(addr = %listener.local_addr()?, origins = ?server.allowed_origins, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparsable_origin() {
        let err = cors_layer(&["http://ok.example".into(), "bad\norigin".into()]).unwrap_err();
        assert!(matches!(err, BotError::InvalidOrigin(o) if o == "bad\norigin"));
    }

    #[test]
    fn error_status_mapping() {
        let resp = BotError::MissingRowId { dataset: "a/b".into() }.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let resp = BotError::MissingCredential("GITHUB_ACCESS_TOKEN".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = BotError::UpstreamStatus { url: "u".into(), status: 404 }.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    }
}
