use serde::{Deserialize, Serialize};

/// Summary record of a user, as exposed to other users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: usize,
    pub email: String,
    pub name: String,
}
