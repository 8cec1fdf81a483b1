use super::partner_models::{Partner, PartnerDirection, PartnerId, PartnerUser};
use anyhow::Result;

pub trait PartnerStore: Send + Sync {
    /// Returns Ok(None) if the relationship does not exist.
    fn get_partner(&self, id: &PartnerId) -> Result<Option<Partner>>;

    /// Inserts the relationship with `in_timeline` set.
    /// Returns Ok(None) if a relationship with the same id already exists.
    fn create_partner(&self, id: &PartnerId) -> Result<Option<Partner>>;

    /// Sets the `in_timeline` flag of a relationship.
    /// Returns Ok(None) if the relationship does not exist.
    fn update_partner(&self, id: &PartnerId, in_timeline: bool) -> Result<Option<Partner>>;

    /// Deletes a relationship and returns it.
    /// Returns Ok(None) if the relationship does not exist.
    fn remove_partner(&self, id: &PartnerId) -> Result<Option<Partner>>;

    /// Returns the users on the other side of every relationship of the given
    /// user in the given direction, each with the relationship's flag.
    fn get_partners(&self, user_id: usize, direction: PartnerDirection)
        -> Result<Vec<PartnerUser>>;
}
