use anyhow::{Context, Result};
use std::{sync::Arc, time::Duration};

use tracing::info;

use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use super::{log_requests, make_partner_routes, state::*, ServerConfig};
use crate::partner::PartnerManager;
use crate::user::{SqliteUserStore, TokenAuthenticator};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
    };
    Json(stats)
}

/// Wires a `PartnerManager` over a single SQLite store.
pub fn make_partner_manager(user_store: Arc<SqliteUserStore>) -> PartnerManager {
    PartnerManager::new(
        user_store.clone(),
        user_store.clone(),
        Arc::new(TokenAuthenticator::new(user_store)),
    )
}

pub fn make_app(config: ServerConfig, partner_manager: PartnerManager) -> Result<Router> {
    let state = ServerState::new(config, partner_manager);

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    let app: Router = home_router
        .merge(make_partner_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests));

    Ok(app)
}

pub async fn run_server(user_store: Arc<SqliteUserStore>, config: ServerConfig) -> Result<()> {
    let port = config.port;
    let app = make_app(config, make_partner_manager(user_store))?;

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;
    info!("Listening on {}", listener.local_addr()?);

    Ok(axum::serve(listener, app).await?)
}
