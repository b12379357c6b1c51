//! Client core for the campus lost & found board.
//!
//! # Overview
//! Holds the session's directory of lost and found listings, the filters
//! the browse views are built from, and the claim workflow. Talks to the
//! backing items API by building `HttpRequest` values and parsing
//! `HttpResponse` values; the host executes the round-trip through a
//! [`Transport`] (host-does-IO pattern), which keeps the core deterministic
//! and testable.
//!
//! # Design
//! - `ItemsClient` is stateless and holds only `base_url`. Each API call is
//!   split into `build_*` and `parse_*` so the I/O boundary is explicit.
//! - `Directory` is the only thing that mutates listings, and it writes
//!   through to the API before touching memory.
//! - `filters` are pure functions over a snapshot.
//! - `Session` owns user, directory, claims and transport; there is no
//!   global state.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod claims;
pub mod client;
pub mod config;
pub mod directory;
pub mod draft;
pub mod error;
pub mod filters;
pub mod http;
pub mod identity;
pub mod session;
pub mod types;

pub use claims::{ClaimBook, ClaimRequest, ClaimStatus, ContactMethod};
pub use client::ItemsClient;
pub use config::{ClientConfig, ConfigError};
pub use directory::{Directory, LoadState};
pub use draft::ItemDraft;
pub use error::{ApiError, ClaimError, DirectoryError, ParseValueError, ValidationError};
pub use filters::{Criteria, Summary};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use identity::{Anonymous, DemoIdentity, IdentityProvider, StaticIdentity, User, FALLBACK_CONTACT};
pub use session::Session;
pub use types::{Category, Condition, Item, ItemId, ItemStatus, ItemType, NewItem, Urgency, CAMPUS_LOCATIONS};
