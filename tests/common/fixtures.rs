//! Test fixture creation
//!
//! Builds a throwaway database holding the test users and their tokens.

use super::constants::*;
use anyhow::{Context, Result};
use partner_server::partner::{PartnerId, PartnerStore};
use partner_server::user::{AuthToken, SqliteUserStore, UserAuthTokenStore, UserStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// A provisioned user together with a valid bearer token.
#[derive(Clone, Debug)]
pub struct TestUser {
    pub id: usize,
    pub email: String,
    pub name: String,
    pub token: String,
}

/// The three users every test server starts with.
#[derive(Clone, Debug)]
pub struct TestUsers {
    pub user1: TestUser,
    pub user2: TestUser,
    pub user3: TestUser,
}

fn create_test_user(store: &SqliteUserStore, email: &str, name: &str) -> Result<TestUser> {
    let id = store.create_user(email, name)?;
    let token = AuthToken::new(id);
    store.add_user_auth_token(token.clone())?;
    Ok(TestUser {
        id,
        email: email.to_string(),
        name: name.to_string(),
        token: token.value.0,
    })
}

/// Creates a temporary database with the three test users.
///
/// Returns the temp dir (keep it alive), the database path and the users.
pub fn create_test_db_with_users() -> Result<(TempDir, PathBuf, TestUsers)> {
    let temp_dir = TempDir::new()?;
    let db_path = temp_dir.path().join("partners.db");
    let store = SqliteUserStore::new(&db_path).context("Failed to create user store")?;

    let users = TestUsers {
        user1: create_test_user(&store, USER_1_EMAIL, USER_1_NAME)?,
        user2: create_test_user(&store, USER_2_EMAIL, USER_2_NAME)?,
        user3: create_test_user(&store, USER_3_EMAIL, USER_3_NAME)?,
    };

    Ok((temp_dir, db_path, users))
}

/// Shares user 1 and user 2's libraries with each other.
pub fn share_mutually(store: &SqliteUserStore, users: &TestUsers) -> Result<()> {
    for (shared_by_id, shared_with_id) in [
        (users.user1.id, users.user2.id),
        (users.user2.id, users.user1.id),
    ] {
        store
            .create_partner(&PartnerId {
                shared_by_id,
                shared_with_id,
            })?
            .context("Partner fixture already present")?;
    }
    Ok(())
}
