//! Claim requests against listings.
//!
//! A claim starts `Pending` and is decided exactly once, by the item's
//! poster, as `Approved` or `Declined`. Claims live only for the session;
//! the item status change an approval causes goes through the directory.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::ClaimError;
use crate::identity::User;
use crate::types::{Item, ItemId, ItemStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimStatus {
    Pending,
    Approved,
    Declined,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Declined => "declined",
        })
    }
}

/// How the claimer wants to be reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMethod {
    Email,
    Phone(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRequest {
    pub id: Uuid,
    pub item_id: ItemId,
    pub claimer_name: String,
    pub claimer_email: String,
    pub message: String,
    pub contact: ContactMethod,
    pub status: ClaimStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Default)]
pub struct ClaimBook {
    claims: Vec<ClaimRequest>,
}

impl ClaimBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> &[ClaimRequest] {
        &self.claims
    }

    pub fn get(&self, id: Uuid) -> Result<&ClaimRequest, ClaimError> {
        self.claims
            .iter()
            .find(|c| c.id == id)
            .ok_or(ClaimError::UnknownClaim(id))
    }

    pub fn for_item(&self, item_id: ItemId) -> Vec<&ClaimRequest> {
        self.claims.iter().filter(|c| c.item_id == item_id).collect()
    }

    /// Pending claims on items for which `is_owned` holds.
    pub fn pending_where<F>(&self, mut is_owned: F) -> Vec<&ClaimRequest>
    where
        F: FnMut(ItemId) -> bool,
    {
        self.claims
            .iter()
            .filter(|c| c.status == ClaimStatus::Pending && is_owned(c.item_id))
            .collect()
    }

    /// Record a new pending claim on `item` by `claimer`.
    pub fn submit(
        &mut self,
        item: &Item,
        claimer: &User,
        message: &str,
        contact: ContactMethod,
        today: NaiveDate,
    ) -> Result<&ClaimRequest, ClaimError> {
        if item.status != ItemStatus::Active {
            return Err(ClaimError::NotClaimable(item.status));
        }
        if item.contact == claimer.email {
            return Err(ClaimError::OwnItem);
        }
        let message = message.trim();
        if message.is_empty() {
            return Err(ClaimError::EmptyMessage);
        }
        if let ContactMethod::Phone(number) = &contact {
            if number.trim().is_empty() {
                return Err(ClaimError::MissingPhone);
            }
        }
        let duplicate = self.claims.iter().any(|c| {
            c.item_id == item.id && c.claimer_email == claimer.email && c.status == ClaimStatus::Pending
        });
        if duplicate {
            return Err(ClaimError::Duplicate);
        }

        self.claims.push(ClaimRequest {
            id: Uuid::new_v4(),
            item_id: item.id,
            claimer_name: claimer.name.clone(),
            claimer_email: claimer.email.clone(),
            message: message.to_string(),
            contact,
            status: ClaimStatus::Pending,
            date: today,
        });
        let last = self.claims.len() - 1;
        Ok(&self.claims[last])
    }

    /// Approve a pending claim. Other pending claims on the same item are
    /// declined.
    pub fn approve(&mut self, id: Uuid) -> Result<ClaimRequest, ClaimError> {
        let approved = self.decide(id, ClaimStatus::Approved)?;
        for other in self
            .claims
            .iter_mut()
            .filter(|c| c.item_id == approved.item_id && c.status == ClaimStatus::Pending)
        {
            other.status = ClaimStatus::Declined;
        }
        Ok(approved)
    }

    pub fn decline(&mut self, id: Uuid) -> Result<ClaimRequest, ClaimError> {
        self.decide(id, ClaimStatus::Declined)
    }

    fn decide(&mut self, id: Uuid, outcome: ClaimStatus) -> Result<ClaimRequest, ClaimError> {
        let claim = self
            .claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ClaimError::UnknownClaim(id))?;
        if claim.status != ClaimStatus::Pending {
            return Err(ClaimError::AlreadyDecided(claim.status));
        }
        claim.status = outcome;
        Ok(claim.clone())
    }
}
