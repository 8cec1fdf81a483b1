use super::{state::ServerState, ApiError};
use crate::user::AuthTokenValue;

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tracing::debug;

/// The authenticated caller of a request.
#[derive(Debug)]
pub struct Session {
    pub user_id: usize,
}

pub const COOKIE_SESSION_TOKEN_KEY: &str = "access_token";
pub const HEADER_SESSION_TOKEN_KEY: &str = "Authorization";
const BEARER_PREFIX: &str = "Bearer ";

fn extract_session_token_from_cookies(parts: &Parts) -> Option<String> {
    CookieJar::from_headers(&parts.headers)
        .get(COOKIE_SESSION_TOKEN_KEY)
        .map(Cookie::value)
        .map(|s| s.to_string())
}

fn extract_session_token_from_headers(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(HEADER_SESSION_TOKEN_KEY)?;
    let value = String::from_utf8_lossy(value.as_bytes());
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(&value).trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        ctx: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token_from_cookies(parts)
            .or_else(|| extract_session_token_from_headers(parts))
            .map(AuthTokenValue);
        if token.is_none() {
            debug!("No token in cookies nor headers.");
        }

        let auth_token = ctx.partner_manager.authenticate(token.as_ref())?;
        debug!("Resolved session for user_id={}", auth_token.user_id);
        Ok(Session {
            user_id: auth_token.user_id,
        })
    }
}
