//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient, SHARED_BY};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_list_partners() {
//!     let server = TestServer::spawn_with_partners().await;
//!     let client = TestClient::authenticated(server.base_url.clone(), &server.users.user1);
//!
//!     let response = client.list_partners(SHARED_BY).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod client;
mod constants;
mod fixtures;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::{TestUser, TestUsers};
pub use server::TestServer;
