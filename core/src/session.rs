//! Everything one user's visit to the board owns.
//!
//! A `Session` ties the signed-in user, the directory, the claim book and
//! the host's transport together, and is passed explicitly to whatever needs
//! them. Pages call into it instead of reaching for shared globals.

use chrono::{Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::claims::{ClaimBook, ClaimRequest, ClaimStatus, ContactMethod};
use crate::client::ItemsClient;
use crate::config::ClientConfig;
use crate::directory::Directory;
use crate::draft::ItemDraft;
use crate::error::{ClaimError, DirectoryError};
use crate::filters::{self, Criteria, Summary};
use crate::http::Transport;
use crate::identity::{IdentityProvider, User};
use crate::types::{Item, ItemId, ItemStatus};

pub struct Session<T: Transport> {
    user: Option<User>,
    directory: Directory,
    claims: ClaimBook,
    transport: T,
}

impl<T: Transport> Session<T> {
    /// Resolve the user and load the directory.
    ///
    /// A failed load does not fail the session: the directory is left in
    /// its terminal error state for the host to display.
    pub fn start(identity: &dyn IdentityProvider, config: &ClientConfig, mut transport: T) -> Self {
        let user = identity.current_user();
        let mut directory = Directory::new(ItemsClient::new(&config.api_url))
            .with_fallback_contact(config.fallback_contact.clone());
        if let Err(e) = directory.initialize(&mut transport) {
            warn!(error = %e, "session started without items");
        }
        if let Some(u) = &user {
            info!(email = %u.email, "session user resolved");
        }
        Self {
            user,
            directory,
            claims: ClaimBook::new(),
            transport,
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn claims(&self) -> &ClaimBook {
        &self.claims
    }

    pub fn browse(&self, criteria: &Criteria) -> Vec<&Item> {
        criteria.apply(self.directory.items())
    }

    /// An item plus up to three similar ones, as the detail page shows.
    pub fn detail(&self, id: ItemId) -> Result<(&Item, Vec<&Item>), DirectoryError> {
        let item = self.directory.get(id)?;
        Ok((item, filters::similar(self.directory.items(), item, 3)))
    }

    /// Post a new listing as the session user.
    pub fn post(&mut self, draft: ItemDraft) -> Result<Item, DirectoryError> {
        self.directory
            .create(draft, self.user.as_ref(), &mut self.transport)
    }

    /// Listings posted by the session user.
    pub fn my_posts(&self) -> Vec<&Item> {
        match &self.user {
            Some(u) => self.directory.list_by_owner(&u.email),
            None => Vec::new(),
        }
    }

    pub fn my_summary(&self) -> Summary {
        Summary::of(self.my_posts())
    }

    pub fn is_owner(&self, item: &Item) -> bool {
        self.user.as_ref().is_some_and(|u| u.email == item.contact)
    }

    /// Ask the poster of `item_id` to hand the item over.
    pub fn claim(
        &mut self,
        item_id: ItemId,
        message: &str,
        contact: ContactMethod,
    ) -> Result<ClaimRequest, DirectoryError> {
        self.claim_on(item_id, message, contact, Local::now().date_naive())
    }

    pub fn claim_on(
        &mut self,
        item_id: ItemId,
        message: &str,
        contact: ContactMethod,
        today: NaiveDate,
    ) -> Result<ClaimRequest, DirectoryError> {
        let claimer = self.user.as_ref().ok_or(ClaimError::SignInRequired)?;
        let item = self.directory.get(item_id)?;
        let claim = self.claims.submit(item, claimer, message, contact, today)?;
        info!(claim = %claim.id, item = %item_id, "claim submitted");
        Ok(claim.clone())
    }

    /// Pending claims on the session user's listings.
    pub fn incoming_claims(&self) -> Vec<&ClaimRequest> {
        let Some(user) = &self.user else {
            return Vec::new();
        };
        let directory = &self.directory;
        self.claims.pending_where(|item_id| {
            directory
                .get(item_id)
                .is_ok_and(|item| item.contact == user.email)
        })
    }

    /// Approve a claim on one of the session user's listings and mark the
    /// item claimed. The claim is only approved once the API accepted the
    /// status change.
    pub fn approve_claim(&mut self, claim_id: Uuid) -> Result<Item, DirectoryError> {
        let item_id = self.owned_pending_claim(claim_id)?;
        let item = self
            .directory
            .update_status(item_id, ItemStatus::Claimed, &mut self.transport)?;
        self.claims.approve(claim_id)?;
        Ok(item)
    }

    pub fn decline_claim(&mut self, claim_id: Uuid) -> Result<ClaimRequest, DirectoryError> {
        self.owned_pending_claim(claim_id)?;
        Ok(self.claims.decline(claim_id)?)
    }

    /// Close out one of the session user's listings.
    pub fn resolve(&mut self, item_id: ItemId) -> Result<Item, DirectoryError> {
        let item = self.directory.get(item_id)?;
        if !self.is_owner(item) {
            return Err(ClaimError::NotOwner.into());
        }
        self.directory
            .update_status(item_id, ItemStatus::Resolved, &mut self.transport)
    }

    fn owned_pending_claim(&self, claim_id: Uuid) -> Result<ItemId, DirectoryError> {
        let claim = self.claims.get(claim_id)?;
        let item = self.directory.get(claim.item_id)?;
        if !self.is_owner(item) {
            return Err(ClaimError::NotOwner.into());
        }
        if claim.status != ClaimStatus::Pending {
            return Err(ClaimError::AlreadyDecided(claim.status).into());
        }
        Ok(claim.item_id)
    }
}
