use super::auth::{AuthToken, AuthTokenValue};
use super::user_models::User;
use anyhow::Result;

pub trait UserAuthTokenStore: Send + Sync {
    /// Returns a user's authentication token given an AuthTokenValue.
    /// Returns Ok(None) if the token does not exist.
    fn get_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;

    /// Updates an auth token with the latest usage timestamp.
    fn update_user_auth_token_last_used_timestamp(&self, token: &AuthTokenValue) -> Result<()>;

    /// Adds a new auth token.
    /// Fails if a token with the same value already exists.
    fn add_user_auth_token(&self, token: AuthToken) -> Result<()>;

    /// Deletes an auth token and returns it.
    /// Returns Ok(None) if the token does not exist.
    fn delete_user_auth_token(&self, token: &AuthTokenValue) -> Result<Option<AuthToken>>;
}

pub trait UserStore: UserAuthTokenStore + Send + Sync {
    /// Creates a new user and returns the user id.
    /// Fails if the email is already taken.
    fn create_user(&self, email: &str, name: &str) -> Result<usize>;

    /// Returns the user with the given id.
    /// Returns Ok(None) if the user does not exist.
    fn get_user(&self, user_id: usize) -> Result<Option<User>>;

    /// Returns the id of the user with the given email.
    /// Returns Ok(None) if no user has that email.
    fn get_user_id(&self, email: &str) -> Result<Option<usize>>;

    /// Returns all users, ordered by id.
    fn get_all_users(&self) -> Result<Vec<User>>;
}
