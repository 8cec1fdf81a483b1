//! Bearer token authentication

use anyhow::Result;
use rand::Rng;
use rand_distr::Alphanumeric;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, warn};

use super::user_store::UserAuthTokenStore;

#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Debug)]
pub struct AuthTokenValue(pub String);

#[derive(Clone, Debug)]
pub struct AuthToken {
    pub user_id: usize,
    pub created: SystemTime,
    pub last_used: Option<SystemTime>,
    pub value: AuthTokenValue,
}

impl AuthTokenValue {
    pub fn generate() -> AuthTokenValue {
        let rng = rand::rng();
        let random_string: String = rng
            .sample_iter(&Alphanumeric)
            .take(64)
            .map(char::from)
            .collect();
        AuthTokenValue(random_string)
    }
}

impl AuthToken {
    /// A fresh, never used token for the given user.
    pub fn new(user_id: usize) -> AuthToken {
        AuthToken {
            user_id,
            created: SystemTime::now(),
            last_used: None,
            value: AuthTokenValue::generate(),
        }
    }
}

/// Maps a bearer credential to the token (and so the user) it belongs to.
pub trait Authenticator: Send + Sync {
    /// Returns Ok(None) if the credential does not belong to anyone.
    fn authenticate(&self, credential: &AuthTokenValue) -> Result<Option<AuthToken>>;
}

pub struct TokenAuthenticator {
    store: Arc<dyn UserAuthTokenStore>,
}

impl TokenAuthenticator {
    pub fn new(store: Arc<dyn UserAuthTokenStore>) -> Self {
        Self { store }
    }
}

impl Authenticator for TokenAuthenticator {
    fn authenticate(&self, credential: &AuthTokenValue) -> Result<Option<AuthToken>> {
        let token = match self.store.get_user_auth_token(credential)? {
            Some(token) => token,
            None => {
                debug!("Auth token not found in database");
                return Ok(None);
            }
        };
        debug!("Found auth token for user_id={}", token.user_id);

        if let Err(e) = self
            .store
            .update_user_auth_token_last_used_timestamp(credential)
        {
            warn!("Failed to update auth token last_used timestamp: {}", e);
        }
        Ok(Some(token))
    }
}
