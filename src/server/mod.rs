mod api_error;
pub mod config;
mod http_layers;
mod partner_routes;
pub mod server;
pub(self) mod session;
pub mod state;

pub use api_error::ApiError;
pub use config::ServerConfig;
pub use http_layers::*;
pub(self) use partner_routes::make_partner_routes;
#[allow(unused_imports)] // Used by main.rs
pub use server::{make_app, make_partner_manager, run_server};
