//! Shared constants for end-to-end tests
//!
//! When test users change, update only this file.

/// Email of the first test user
pub const USER_1_EMAIL: &str = "user1@example.com";

/// Display name of the first test user
pub const USER_1_NAME: &str = "User 1";

/// Email of the second test user
pub const USER_2_EMAIL: &str = "user2@example.com";

/// Display name of the second test user
pub const USER_2_NAME: &str = "User 2";

/// Email of the third test user
pub const USER_3_EMAIL: &str = "user3@example.com";

/// Display name of the third test user
pub const USER_3_NAME: &str = "User 3";

/// Wire value of the "shared by me" direction
pub const SHARED_BY: &str = "partners-shared-by";

/// Wire value of the "shared with me" direction
pub const SHARED_WITH: &str = "partners-shared-with";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the server to answer on `/`
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Delay between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout of every test request
pub const REQUEST_TIMEOUT_SECS: u64 = 5;
