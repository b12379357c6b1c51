//! Error types for the lost & found client.
//!
//! # Design
//! `ApiError` describes what went wrong on the wire. `NotFound` gets a
//! dedicated variant because callers distinguish "the item does not exist"
//! from "the server returned an unexpected status"; every other non-success
//! response lands in `HttpError` with the raw status and body.
//!
//! `DirectoryError` is what the directory store hands to its callers. It
//! tags each wire failure with the operation that produced it (`Fetch`,
//! `Create`, `Update`) and adds the local failures that never reach the
//! network.

use thiserror::Error;

use crate::types::{ItemId, ItemStatus, ItemType};

/// Errors returned by `ItemsClient` parse methods and by transports.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-success status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The host could not complete the round-trip at all.
    #[error("transport failed: {0}")]
    Transport(String),
}

/// A draft is missing something its item type requires.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("choose whether the item was lost or found")]
    MissingType,

    #[error("{field} is required for a {item_type} item")]
    MissingField {
        item_type: ItemType,
        field: &'static str,
    },

    #[error("reward must be a non-negative amount, got {0}")]
    InvalidReward(f64),
}

/// Claim workflow rejections.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClaimError {
    #[error("sign in to claim an item")]
    SignInRequired,

    #[error("you cannot claim your own listing")]
    OwnItem,

    #[error("item is {0} and can no longer be claimed")]
    NotClaimable(ItemStatus),

    #[error("a claim message is required")]
    EmptyMessage,

    #[error("a phone number is required when asking to be contacted by phone")]
    MissingPhone,

    #[error("you already have a pending claim on this item")]
    Duplicate,

    #[error("claim {0} does not exist")]
    UnknownClaim(uuid::Uuid),

    #[error("claim was already {0}")]
    AlreadyDecided(crate::claims::ClaimStatus),

    #[error("only the poster of an item can decide its claims")]
    NotOwner,
}

/// Errors surfaced by the directory store and the session built on it.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The initial collection load failed. The directory serves nothing.
    #[error("failed to fetch items: {0}")]
    Fetch(#[source] ApiError),

    /// Persisting a new item failed. The directory is unchanged.
    #[error("failed to create item: {0}")]
    Create(#[source] ApiError),

    /// Persisting a status change failed. The directory is unchanged.
    #[error("failed to update item: {0}")]
    Update(#[source] ApiError),

    #[error("invalid item: {0}")]
    Validation(#[from] ValidationError),

    #[error("item {0} not found")]
    NotFound(ItemId),

    /// The collection has not been loaded, or loading failed.
    #[error("directory is not ready")]
    NotReady,

    #[error("directory was already initialized")]
    AlreadyInitialized,

    /// The backing API handed back an id the directory already holds.
    #[error("server returned duplicate item id {0}")]
    DuplicateId(ItemId),

    #[error("cannot move item from {from} to {to}")]
    InvalidTransition { from: ItemStatus, to: ItemStatus },

    #[error(transparent)]
    Claim(#[from] ClaimError),
}

/// A string did not name any value of a closed enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}
