use axum::extract::FromRef;

use crate::partner::PartnerManager;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedPartnerManager = Arc<PartnerManager>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub partner_manager: GuardedPartnerManager,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, partner_manager: PartnerManager) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            partner_manager: Arc::new(partner_manager),
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedPartnerManager {
    fn from_ref(input: &ServerState) -> Self {
        input.partner_manager.clone()
    }
}
