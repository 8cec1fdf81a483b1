use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use crate::user::User;

/// Identity of a relationship: `shared_by_id` grants `shared_with_id` access
/// to their library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PartnerId {
    pub shared_by_id: usize,
    pub shared_with_id: usize,
}

#[derive(Clone, Debug)]
pub struct Partner {
    pub shared_by_id: usize,
    pub shared_with_id: usize,
    pub in_timeline: bool,
    pub created: SystemTime,
    pub updated: SystemTime,
}

impl Partner {
    pub fn id(&self) -> PartnerId {
        PartnerId {
            shared_by_id: self.shared_by_id,
            shared_with_id: self.shared_with_id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartnerDirection {
    /// The user is the one sharing.
    #[serde(rename = "partners-shared-by")]
    SharedBy,
    /// The user is the one being shared with.
    #[serde(rename = "partners-shared-with")]
    SharedWith,
}

/// The other user of a relationship, as seen from one side of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerUser {
    #[serde(flatten)]
    pub user: User,
    pub in_timeline: bool,
}
