use super::{
    error::PartnerError,
    partner_models::{PartnerDirection, PartnerId, PartnerUser},
    partner_store::PartnerStore,
};
use crate::user::{AuthToken, AuthTokenValue, Authenticator, User, UserStore};
use std::sync::Arc;
use tracing::{debug, info};

pub struct PartnerManager {
    user_store: Arc<dyn UserStore>,
    partner_store: Arc<dyn PartnerStore>,
    authenticator: Arc<dyn Authenticator>,
}

impl PartnerManager {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        partner_store: Arc<dyn PartnerStore>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            user_store,
            partner_store,
            authenticator,
        }
    }

    /// Resolves the acting user. A missing or unknown credential is
    /// `Unauthenticated`.
    pub fn authenticate(
        &self,
        credential: Option<&AuthTokenValue>,
    ) -> Result<AuthToken, PartnerError> {
        let credential = credential.ok_or(PartnerError::Unauthenticated)?;
        self.authenticator
            .authenticate(credential)?
            .ok_or(PartnerError::Unauthenticated)
    }

    pub fn list_partners(
        &self,
        actor_id: usize,
        direction: PartnerDirection,
    ) -> Result<Vec<PartnerUser>, PartnerError> {
        Ok(self.partner_store.get_partners(actor_id, direction)?)
    }

    /// Shares the actor's library with `target_id`.
    pub fn create_partner(
        &self,
        actor_id: usize,
        target_id: usize,
    ) -> Result<PartnerUser, PartnerError> {
        if actor_id == target_id {
            return Err(PartnerError::SelfShare);
        }
        let target = self.get_target(target_id)?;

        let id = PartnerId {
            shared_by_id: actor_id,
            shared_with_id: target_id,
        };
        let partner = self
            .partner_store
            .create_partner(&id)?
            .ok_or(PartnerError::PartnerAlreadyExists)?;
        info!("User {} is now sharing with user {}", actor_id, target_id);

        Ok(PartnerUser {
            user: target,
            in_timeline: partner.in_timeline,
        })
    }

    pub fn update_partner(
        &self,
        actor_id: usize,
        target_id: usize,
        in_timeline: bool,
    ) -> Result<PartnerUser, PartnerError> {
        let id = PartnerId {
            shared_by_id: actor_id,
            shared_with_id: target_id,
        };
        let partner = self
            .partner_store
            .update_partner(&id, in_timeline)?
            .ok_or(PartnerError::PartnerNotFound)?;
        debug!("Set in_timeline={} on partner {:?}", in_timeline, id);

        Ok(PartnerUser {
            user: self.get_target(target_id)?,
            in_timeline: partner.in_timeline,
        })
    }

    pub fn remove_partner(&self, actor_id: usize, target_id: usize) -> Result<(), PartnerError> {
        let id = PartnerId {
            shared_by_id: actor_id,
            shared_with_id: target_id,
        };
        let removed = self
            .partner_store
            .remove_partner(&id)?
            .ok_or(PartnerError::PartnerNotFound)?;
        info!("Removed partner {:?}", removed.id());
        Ok(())
    }

    fn get_target(&self, target_id: usize) -> Result<User, PartnerError> {
        self.user_store
            .get_user(target_id)?
            .ok_or(PartnerError::UserNotFound(target_id))
    }
}
