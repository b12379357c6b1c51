//! The in-memory directory of listings for one session.
//!
//! # Design
//! `Directory` is the single source of truth for items on the client. It is
//! loaded once from the backing API and afterwards only changes through
//! [`Directory::create`] and [`Directory::update_status`], both of which
//! write through to the API first and touch the in-memory list only when
//! the API accepted the change. There is no optimistic insert, no retry and
//! no stale fallback: a failed load leaves the directory empty and in a
//! terminal `Failed` state.
//!
//! Newly created items go to the head of the list, so iteration order is
//! most-recent-first. Nothing else reorders it.

use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use tracing::{info, warn};

use crate::client::ItemsClient;
use crate::draft::ItemDraft;
use crate::error::DirectoryError;
use crate::filters;
use crate::http::Transport;
use crate::identity::{User, FALLBACK_CONTACT};
use crate::types::{Item, ItemId, ItemStatus, NewItem};

/// Where the directory is in its one-shot load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// The initial fetch has not completed. No items are served.
    Loading,
    Ready,
    /// The initial fetch failed. Terminal for the session.
    Failed(String),
}

#[derive(Debug)]
pub struct Directory {
    client: ItemsClient,
    fallback_contact: String,
    state: LoadState,
    items: Vec<Item>,
}

impl Directory {
    pub fn new(client: ItemsClient) -> Self {
        Self {
            client,
            fallback_contact: FALLBACK_CONTACT.to_string(),
            state: LoadState::Loading,
            items: Vec::new(),
        }
    }

    /// Contact recorded on items created without a signed-in user.
    pub fn with_fallback_contact(mut self, contact: impl Into<String>) -> Self {
        self.fallback_contact = contact.into();
        self
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn is_ready(&self) -> bool {
        self.state == LoadState::Ready
    }

    /// The session-level error message, once loading has failed.
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LoadState::Failed(reason) => Some(reason),
            _ => None,
        }
    }

    /// The current snapshot. Empty unless the directory is ready.
    pub fn items(&self) -> &[Item] {
        match self.state {
            LoadState::Ready => &self.items,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Load the full collection. Allowed once per directory.
    pub fn initialize(&mut self, transport: &mut impl Transport) -> Result<&[Item], DirectoryError> {
        if self.state != LoadState::Loading {
            return Err(DirectoryError::AlreadyInitialized);
        }

        let request = self.client.build_list_items(None);
        let loaded = transport
            .execute(request)
            .and_then(|response| self.client.parse_list_items(response));

        match loaded {
            Ok(items) => {
                self.items = dedup_by_id(items);
                self.state = LoadState::Ready;
                info!(count = self.items.len(), "directory loaded");
                Ok(&self.items)
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch items");
                self.items.clear();
                self.state = LoadState::Failed("Failed to fetch items".to_string());
                Err(DirectoryError::Fetch(e))
            }
        }
    }

    /// Persist a new item stamped with today's date.
    pub fn create(
        &mut self,
        draft: ItemDraft,
        user: Option<&User>,
        transport: &mut impl Transport,
    ) -> Result<Item, DirectoryError> {
        self.create_on(draft, user, Local::now().date_naive(), transport)
    }

    /// Persist a new item stamped with `today`.
    ///
    /// The draft is validated before anything is sent. The item is prepended
    /// to the directory only once the API returns it.
    pub fn create_on(
        &mut self,
        draft: ItemDraft,
        user: Option<&User>,
        today: NaiveDate,
        transport: &mut impl Transport,
    ) -> Result<Item, DirectoryError> {
        let contact = user.map_or(self.fallback_contact.as_str(), |u| u.email.as_str());
        let new_item = draft.into_new_item(today, contact)?;
        if !self.is_ready() {
            return Err(DirectoryError::NotReady);
        }

        let created = self
            .client
            .build_create_item(&new_item)
            .and_then(|request| transport.execute(request))
            .and_then(|response| self.client.parse_create_item(response))
            .map_err(|e| {
                warn!(error = %e, title = %new_item.title, "failed to create item");
                DirectoryError::Create(e)
            })?;

        if self.items.iter().any(|i| i.id == created.id) {
            warn!(id = %created.id, "server returned an id already in the directory");
            return Err(DirectoryError::DuplicateId(created.id));
        }

        info!(id = %created.id, item_type = %created.item_type, "item created");
        self.items.insert(0, created.clone());
        Ok(created)
    }

    pub fn get(&self, id: ItemId) -> Result<&Item, DirectoryError> {
        self.items()
            .iter()
            .find(|i| i.id == id)
            .ok_or(DirectoryError::NotFound(id))
    }

    /// Items posted by `email`, most recent first.
    pub fn list_by_owner(&self, email: &str) -> Vec<&Item> {
        filters::by_owner(self.items(), email)
    }

    /// Move an item forward in its lifecycle through `PUT /items/{id}`.
    ///
    /// The in-memory item is replaced, in place, only after the API accepts
    /// the change.
    pub fn update_status(
        &mut self,
        id: ItemId,
        next: ItemStatus,
        transport: &mut impl Transport,
    ) -> Result<Item, DirectoryError> {
        let current = self.get(id)?;
        if !current.status.can_advance_to(next) {
            return Err(DirectoryError::InvalidTransition {
                from: current.status,
                to: next,
            });
        }

        let mut body = NewItem::from(current);
        body.status = next;

        let updated = self
            .client
            .build_update_item(id, &body)
            .and_then(|request| transport.execute(request))
            .and_then(|response| self.client.parse_update_item(response))
            .map_err(|e| {
                warn!(error = %e, %id, "failed to update item");
                DirectoryError::Update(e)
            })?;

        let slot = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(DirectoryError::NotFound(id))?;
        // Type and poster never change after creation.
        if updated.item_type != slot.item_type || updated.contact != slot.contact {
            warn!(%id, "ignoring type or contact change in update response");
        }
        *slot = Item {
            id,
            item_type: slot.item_type,
            contact: std::mem::take(&mut slot.contact),
            ..updated
        };
        info!(%id, status = %slot.status, "item status updated");
        Ok(slot.clone())
    }
}

/// Keep the first occurrence of each id.
fn dedup_by_id(items: Vec<Item>) -> Vec<Item> {
    let mut seen = HashSet::with_capacity(items.len());
    let before = items.len();
    let kept: Vec<Item> = items.into_iter().filter(|i| seen.insert(i.id)).collect();
    if kept.len() != before {
        warn!(dropped = before - kept.len(), "ignoring items with duplicate ids");
    }
    kept
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::error::{ApiError, ValidationError};
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};
    use crate::identity::{DemoIdentity, IdentityProvider};
    use crate::types::{Category, ItemType};

    const WALLET: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","type":"lost",
        "title":"Blue Wallet","description":"Leather","category":"personal",
        "location":"Main Library","date":"2025-03-15","status":"active",
        "contact":"john.doe@umt.edu","reward":20}"#;
    const BACKPACK: &str = r#"{"id":"00000000-0000-0000-0000-000000000002","type":"found",
        "title":"Black Backpack","description":"North Face","category":"bags",
        "location":"Student Cafeteria","date":"2025-03-14","status":"active",
        "contact":"finder@umt.edu","condition":"good","storageLocation":"Security Office"}"#;

    /// Replays canned responses and records every request it was handed.
    struct Scripted {
        responses: Vec<Result<HttpResponse, ApiError>>,
        seen: Vec<HttpRequest>,
    }

    impl Scripted {
        fn new(responses: Vec<Result<HttpResponse, ApiError>>) -> Self {
            Self { responses, seen: Vec::new() }
        }
    }

    impl Transport for Scripted {
        fn execute(&mut self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.push(request);
            assert!(!self.responses.is_empty(), "unexpected request");
            self.responses.remove(0)
        }
    }

    fn ok(status: u16, body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn loaded() -> Directory {
        let mut dir = Directory::new(ItemsClient::new("http://api/api"));
        let mut transport = Scripted::new(vec![ok(200, &format!("[{WALLET},{BACKPACK}]"))]);
        dir.initialize(&mut transport).unwrap();
        dir
    }

    fn keys_draft() -> ItemDraft {
        ItemDraft {
            title: "Car Keys".to_string(),
            category: Some(Category::Personal),
            description: "Toyota key with a red lanyard".to_string(),
            location: "Parking Lot A".to_string(),
            date: Some(day(16)),
            ..ItemDraft::lost()
        }
    }

    /// Echo the posted body back as a created item with the given id.
    fn echo_created(id: u128) -> impl FnMut(HttpRequest) -> Result<HttpResponse, ApiError> {
        move |request: HttpRequest| {
            assert_eq!(request.method, HttpMethod::Post);
            let mut body: serde_json::Value =
                serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
            body["id"] = serde_json::json!(Uuid::from_u128(id));
            ok(201, &body.to_string())
        }
    }

    #[test]
    fn starts_loading_with_no_items() {
        let dir = Directory::new(ItemsClient::new("http://api"));
        assert!(dir.is_loading());
        assert!(dir.is_empty());
    }

    #[test]
    fn initialize_loads_items_in_server_order() {
        let dir = loaded();
        assert!(dir.is_ready());
        assert_eq!(dir.len(), 2);
        assert_eq!(dir.items()[0].title, "Blue Wallet");
    }

    #[test]
    fn initialize_requests_the_full_collection() {
        let mut dir = Directory::new(ItemsClient::new("http://api/api"));
        let mut transport = Scripted::new(vec![ok(200, "[]")]);
        dir.initialize(&mut transport).unwrap();
        assert_eq!(transport.seen.len(), 1);
        assert_eq!(transport.seen[0].path, "http://api/api/items");
    }

    #[test]
    fn failed_initialize_is_terminal_and_empty() {
        let mut dir = Directory::new(ItemsClient::new("http://api"));
        let mut transport = Scripted::new(vec![ok(500, "boom")]);
        let err = dir.initialize(&mut transport).unwrap_err();
        assert!(matches!(err, DirectoryError::Fetch(ApiError::HttpError { status: 500, .. })));
        assert_eq!(dir.len(), 0);
        assert!(!dir.is_loading());
        assert_eq!(dir.error(), Some("Failed to fetch items"));

        let err = dir.initialize(&mut transport).unwrap_err();
        assert!(matches!(err, DirectoryError::AlreadyInitialized));
    }

    #[test]
    fn unreachable_api_is_a_fetch_error() {
        let mut dir = Directory::new(ItemsClient::new("http://api"));
        let mut transport =
            |_: HttpRequest| -> Result<HttpResponse, ApiError> { Err(ApiError::Transport("refused".to_string())) };
        let err = dir.initialize(&mut transport).unwrap_err();
        assert!(matches!(err, DirectoryError::Fetch(ApiError::Transport(_))));
        assert!(matches!(dir.state(), LoadState::Failed(_)));
    }

    #[test]
    fn duplicate_ids_from_server_are_dropped() {
        let mut dir = Directory::new(ItemsClient::new("http://api"));
        let mut transport = Scripted::new(vec![ok(200, &format!("[{WALLET},{WALLET},{BACKPACK}]"))]);
        dir.initialize(&mut transport).unwrap();
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn create_stamps_fields_and_prepends() {
        let mut dir = loaded();
        let user = DemoIdentity.current_user().unwrap();
        let item = dir
            .create_on(keys_draft(), Some(&user), day(17), &mut echo_created(9))
            .unwrap();

        assert_eq!(item.status, ItemStatus::Active);
        assert_eq!(item.contact, "john.doe@umt.edu");
        assert_eq!(item.date, day(17));
        assert_eq!(item.occurred_on, Some(day(16)));
        assert_eq!(dir.items()[0].id, Uuid::from_u128(9));
        assert_eq!(dir.len(), 3);
        assert!(dir.list_by_owner("john.doe@umt.edu").iter().any(|i| i.id == item.id));
    }

    #[test]
    fn create_without_user_uses_fallback_contact() {
        let mut dir = loaded();
        let item = dir
            .create_on(keys_draft(), None, day(17), &mut echo_created(9))
            .unwrap();
        assert_eq!(item.contact, FALLBACK_CONTACT);
    }

    #[test]
    fn configured_fallback_contact_is_used() {
        let mut dir = Directory::new(ItemsClient::new("http://api")).with_fallback_contact("desk@umt.edu");
        dir.initialize(&mut Scripted::new(vec![ok(200, "[]")])).unwrap();
        let item = dir
            .create_on(keys_draft(), None, day(17), &mut echo_created(9))
            .unwrap();
        assert_eq!(item.contact, "desk@umt.edu");
    }

    #[test]
    fn invalid_draft_never_reaches_the_api() {
        let mut dir = loaded();
        let draft = ItemDraft {
            title: String::new(),
            category: Some(Category::Electronics),
            ..keys_draft()
        };
        let mut transport = Scripted::new(Vec::new());
        let err = dir.create_on(draft, None, day(17), &mut transport).unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::Validation(ValidationError::MissingField { field: "title", .. })
        ));
        assert!(transport.seen.is_empty());
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn failed_create_leaves_directory_unchanged() {
        let mut dir = loaded();
        let before = dir.items().to_vec();
        let mut transport = Scripted::new(vec![ok(500, "database down")]);
        let err = dir
            .create_on(keys_draft(), None, day(17), &mut transport)
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Create(ApiError::HttpError { status: 500, .. })));
        assert_eq!(dir.items(), before.as_slice());
    }

    #[test]
    fn create_before_load_is_rejected() {
        let mut dir = Directory::new(ItemsClient::new("http://api"));
        let mut transport = Scripted::new(Vec::new());
        let err = dir
            .create_on(keys_draft(), None, day(17), &mut transport)
            .unwrap_err();
        assert!(matches!(err, DirectoryError::NotReady));
    }

    #[test]
    fn create_rejects_reused_id() {
        let mut dir = loaded();
        let err = dir
            .create_on(keys_draft(), None, day(17), &mut echo_created(1))
            .unwrap_err();
        assert!(matches!(err, DirectoryError::DuplicateId(_)));
        assert_eq!(dir.len(), 2);
    }

    #[test]
    fn get_finds_and_misses() {
        let dir = loaded();
        assert_eq!(dir.get(Uuid::from_u128(2)).unwrap().title, "Black Backpack");
        let err = dir.get(Uuid::from_u128(42)).unwrap_err();
        assert!(matches!(err, DirectoryError::NotFound(id) if id == Uuid::from_u128(42)));
    }

    #[test]
    fn list_by_owner_filters_on_contact() {
        let dir = loaded();
        let mine = dir.list_by_owner("finder@umt.edu");
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].item_type, ItemType::Found);
        assert!(dir.list_by_owner("nobody@umt.edu").is_empty());
    }

    #[test]
    fn update_status_replaces_item_in_place() {
        let mut dir = loaded();
        let mut transport = |request: HttpRequest| -> Result<HttpResponse, ApiError> {
            assert_eq!(request.method, HttpMethod::Put);
            assert!(request.path.ends_with("/items/00000000-0000-0000-0000-000000000002"));
            ok(200, &BACKPACK.replace(r#""status":"active""#, r#""status":"claimed""#))
        };
        let item = dir
            .update_status(Uuid::from_u128(2), ItemStatus::Claimed, &mut transport)
            .unwrap();
        assert_eq!(item.status, ItemStatus::Claimed);
        assert_eq!(dir.items()[1].status, ItemStatus::Claimed);
    }

    #[test]
    fn update_status_keeps_type_and_contact() {
        let mut dir = loaded();
        let mut transport = |_: HttpRequest| -> Result<HttpResponse, ApiError> {
            let echoed = BACKPACK
                .replace(r#""status":"active""#, r#""status":"claimed""#)
                .replace(r#""type":"found""#, r#""type":"lost""#)
                .replace("finder@umt.edu", "someone.else@umt.edu");
            ok(200, &echoed)
        };
        let item = dir
            .update_status(Uuid::from_u128(2), ItemStatus::Claimed, &mut transport)
            .unwrap();
        assert_eq!(item.status, ItemStatus::Claimed);
        assert_eq!(item.item_type, ItemType::Found);
        assert_eq!(item.contact, "finder@umt.edu");
        assert_eq!(dir.items()[1].item_type, ItemType::Found);
        assert_eq!(dir.list_by_owner("finder@umt.edu").len(), 1);
    }

    #[test]
    fn update_status_rejects_regression_locally() {
        let mut dir = loaded();
        let mut transport = Scripted::new(Vec::new());
        let err = dir
            .update_status(Uuid::from_u128(1), ItemStatus::Active, &mut transport)
            .unwrap_err();
        assert!(matches!(
            err,
            DirectoryError::InvalidTransition {
                from: ItemStatus::Active,
                to: ItemStatus::Active
            }
        ));
        assert!(transport.seen.is_empty());
    }

    #[test]
    fn failed_update_keeps_old_status() {
        let mut dir = loaded();
        let mut transport = Scripted::new(vec![ok(404, "")]);
        let err = dir
            .update_status(Uuid::from_u128(1), ItemStatus::Resolved, &mut transport)
            .unwrap_err();
        assert!(matches!(err, DirectoryError::Update(ApiError::NotFound)));
        assert_eq!(dir.get(Uuid::from_u128(1)).unwrap().status, ItemStatus::Active);
    }
}
