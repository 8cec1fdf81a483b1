mod error;
mod partner_manager;
pub mod partner_models;
mod partner_store;

pub use error::PartnerError;
pub use partner_manager::PartnerManager;
pub use partner_models::{Partner, PartnerDirection, PartnerId, PartnerUser};
pub use partner_store::PartnerStore;
