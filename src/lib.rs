//! Partner Server Library
//!
//! Directed library-sharing relationships between users, served over HTTP.

pub mod config;
pub mod partner;
pub mod server;
pub mod sqlite_persistence;
pub mod user;

// Re-export commonly used types for convenience
pub use partner::{PartnerDirection, PartnerError, PartnerManager, PartnerUser};
pub use server::{make_app, make_partner_manager, run_server, RequestsLoggingLevel, ServerConfig};
pub use user::{AuthToken, AuthTokenValue, SqliteUserStore, User, UserAuthTokenStore, UserStore};
