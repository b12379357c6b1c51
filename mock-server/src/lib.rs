use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Lost,
    Found,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Claimed,
    Resolved,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Fair,
    Poor,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub date: NaiveDate,
    pub status: ItemStatus,
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occurred_on: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reward: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_location: Option<String>,
}

/// Body of `POST /api/items` and `PUT /api/items/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInput {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub contact: String,
    /// Defaults to the server's today.
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub status: ItemStatus,
    pub image: Option<String>,
    pub occurred_on: Option<NaiveDate>,
    pub urgency: Option<Urgency>,
    pub reward: Option<f64>,
    pub condition: Option<Condition>,
    pub storage_location: Option<String>,
}

impl ItemInput {
    fn into_item(self, id: Uuid) -> Item {
        Item {
            id,
            item_type: self.item_type,
            title: self.title,
            description: self.description,
            location: self.location,
            category: self.category,
            date: self.date.unwrap_or_else(|| Local::now().date_naive()),
            status: self.status,
            contact: self.contact,
            image: self.image,
            occurred_on: self.occurred_on,
            urgency: self.urgency,
            reward: self.reward,
            condition: self.condition,
            storage_location: self.storage_location,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(rename = "type")]
    pub item_type: Option<ItemType>,
}

/// Items, newest first.
pub type Db = Arc<RwLock<Vec<Item>>>;

pub fn app() -> Router {
    app_with(Vec::new())
}

/// Router backed by an in-memory store seeded with `items`.
pub fn app_with(items: Vec<Item>) -> Router {
    let db: Db = Arc::new(RwLock::new(items));
    Router::new()
        .route("/api/items", get(list_items).post(create_item))
        .route("/api/items/{id}", get(get_item).put(update_item))
        .with_state(db)
}

pub async fn run_with(listener: TcpListener, items: Vec<Item>) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(items)).await
}

/// A few listings so a fresh board is not empty.
pub fn demo_items() -> Vec<Item> {
    let day = |d| NaiveDate::from_ymd_opt(2025, 3, d).unwrap_or_default();
    vec![
        Item {
            id: Uuid::new_v4(),
            item_type: ItemType::Lost,
            title: "Blue Wallet".to_string(),
            description: "Leather wallet with student ID and a library card".to_string(),
            location: "Main Library".to_string(),
            category: "personal".to_string(),
            date: day(15),
            status: ItemStatus::Active,
            contact: "sarah.k@umt.edu".to_string(),
            image: None,
            occurred_on: Some(day(14)),
            urgency: Some(Urgency::High),
            reward: Some(20.0),
            condition: None,
            storage_location: None,
        },
        Item {
            id: Uuid::new_v4(),
            item_type: ItemType::Found,
            title: "Black Backpack".to_string(),
            description: "North Face backpack with a laptop sleeve".to_string(),
            location: "Student Cafeteria".to_string(),
            category: "bags".to_string(),
            date: day(14),
            status: ItemStatus::Active,
            contact: "john.doe@umt.edu".to_string(),
            image: None,
            occurred_on: Some(day(14)),
            urgency: None,
            reward: None,
            condition: Some(Condition::Good),
            storage_location: Some("Campus Security Office".to_string()),
        },
        Item {
            id: Uuid::new_v4(),
            item_type: ItemType::Lost,
            title: "iPhone 13".to_string(),
            description: "Black case with a cracked screen protector".to_string(),
            location: "Computer Science Building".to_string(),
            category: "electronics".to_string(),
            date: day(12),
            status: ItemStatus::Active,
            contact: "mike.r@umt.edu".to_string(),
            image: None,
            occurred_on: Some(day(11)),
            urgency: Some(Urgency::Medium),
            reward: None,
            condition: None,
            storage_location: None,
        },
    ]
}

async fn list_items(State(db): State<Db>, Query(query): Query<ListQuery>) -> Json<Vec<Item>> {
    let items = db.read().await;
    let mut matching: Vec<Item> = items
        .iter()
        .filter(|i| query.item_type.is_none_or(|t| i.item_type == t))
        .cloned()
        .collect();
    // Stable, so same-day items keep newest-first insertion order.
    matching.sort_by(|a, b| b.date.cmp(&a.date));
    Json(matching)
}

async fn create_item(State(db): State<Db>, Json(input): Json<ItemInput>) -> (StatusCode, Json<Item>) {
    let item = input.into_item(Uuid::new_v4());
    info!(id = %item.id, title = %item.title, "item created");
    db.write().await.insert(0, item.clone());
    (StatusCode::CREATED, Json(item))
}

async fn get_item(State(db): State<Db>, Path(id): Path<Uuid>) -> Result<Json<Item>, StatusCode> {
    let items = db.read().await;
    items
        .iter()
        .find(|i| i.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn update_item(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<ItemInput>,
) -> Result<Json<Item>, StatusCode> {
    let mut items = db.write().await;
    let item = items.iter_mut().find(|i| i.id == id).ok_or(StatusCode::NOT_FOUND)?;
    *item = input.into_item(id);
    info!(%id, status = ?item.status, "item updated");
    Ok(Json(item.clone()))
}
