//! HTTP client for end-to-end tests
//!
//! Wraps reqwest and provides methods for all partner-server endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use super::fixtures::TestUser;
use reqwest::Response;
use serde_json::json;
use std::time::Duration;

/// HTTP test client, optionally carrying a bearer token
pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
    token: Option<String>,
}

impl TestClient {
    /// Creates a client that sends no credentials
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            base_url,
            token: None,
        }
    }

    /// Creates a client that authenticates as `user` with a bearer token
    pub fn authenticated(base_url: String, user: &TestUser) -> Self {
        Self::with_token(base_url, &user.token)
    }

    /// Creates a client that sends an arbitrary bearer token
    pub fn with_token(base_url: String, token: &str) -> Self {
        Self {
            token: Some(token.to_string()),
            ..Self::new(base_url)
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // ========================================================================
    // Partner Endpoints
    // ========================================================================

    /// GET /partner?direction={direction}
    pub async fn list_partners(&self, direction: &str) -> Response {
        self.request(reqwest::Method::GET, "/partner")
            .query(&[("direction", direction)])
            .send()
            .await
            .expect("List partners request failed")
    }

    /// POST /partner/{id}
    pub async fn create_partner(&self, id: usize) -> Response {
        self.request(reqwest::Method::POST, &format!("/partner/{}", id))
            .send()
            .await
            .expect("Create partner request failed")
    }

    /// PUT /partner/{id}
    pub async fn update_partner(&self, id: usize, in_timeline: bool) -> Response {
        self.request(reqwest::Method::PUT, &format!("/partner/{}", id))
            .json(&json!({ "inTimeline": in_timeline }))
            .send()
            .await
            .expect("Update partner request failed")
    }

    /// DELETE /partner/{id}
    pub async fn remove_partner(&self, id: usize) -> Response {
        self.request(reqwest::Method::DELETE, &format!("/partner/{}", id))
            .send()
            .await
            .expect("Remove partner request failed")
    }

    // ========================================================================
    // Raw requests
    // ========================================================================

    /// GET /partner with a caller-supplied query string
    pub async fn list_partners_raw(&self, query: &str) -> Response {
        self.request(reqwest::Method::GET, &format!("/partner{}", query))
            .send()
            .await
            .expect("List partners request failed")
    }

    /// PUT /partner/{id} with a caller-supplied JSON body
    pub async fn update_partner_raw(&self, id: &str, body: serde_json::Value) -> Response {
        self.request(reqwest::Method::PUT, &format!("/partner/{}", id))
            .json(&body)
            .send()
            .await
            .expect("Update partner request failed")
    }

    /// GET /
    pub async fn get_stats(&self) -> Response {
        self.request(reqwest::Method::GET, "/")
            .send()
            .await
            .expect("Stats request failed")
    }
}
