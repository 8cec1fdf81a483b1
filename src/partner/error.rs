use thiserror::Error;

#[derive(Debug, Error)]
pub enum PartnerError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("User not found")]
    UserNotFound(usize),

    #[error("Partner not found")]
    PartnerNotFound,

    #[error("Partner already exists")]
    PartnerAlreadyExists,

    #[error("Cannot share with yourself")]
    SelfShare,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}
