//! Domain types for the lost & found directory.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! integration tests catch any schema drift between the two crates. Wire
//! names are camelCase and enum values are lowercase strings, matching what
//! the backing API emits.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseValueError;

/// Server-assigned identifier of an item.
pub type ItemId = Uuid;

/// Campus locations offered by the posting forms. Items may still carry any
/// free-form location.
pub const CAMPUS_LOCATIONS: [&str; 12] = [
    "Main Library",
    "Student Cafeteria",
    "Computer Science Building",
    "Engineering Building",
    "Business Building",
    "Art Building",
    "Main Gymnasium",
    "Student Center",
    "Parking Lot A",
    "Parking Lot B",
    "Dormitory Area",
    "Other",
];

/// Declares a closed, lowercase-on-the-wire enum with `as_str`, `ALL`,
/// `Display` and `FromStr`.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident as $kind:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseValueError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Whether a listing reports something lost or something found.
    ItemType as "item type" {
        Lost => "lost",
        Found => "found",
    }
}

wire_enum! {
    Category as "category" {
        Electronics => "electronics",
        Bags => "bags",
        Jewelry => "jewelry",
        Clothing => "clothing",
        Personal => "personal",
        Books => "books",
        Sports => "sports",
        Other => "other",
    }
}

wire_enum! {
    /// Lifecycle of a listing. Only moves forward.
    ItemStatus as "status" {
        Active => "active",
        Claimed => "claimed",
        Resolved => "resolved",
    }
}

wire_enum! {
    Urgency as "urgency" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

wire_enum! {
    Condition as "condition" {
        Excellent => "excellent",
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

impl Category {
    /// Human-readable name shown in browse views.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Bags => "Bags & Backpacks",
            Category::Jewelry => "Jewelry",
            Category::Clothing => "Clothing",
            Category::Personal => "Personal Items",
            Category::Books => "Books & Stationery",
            Category::Sports => "Sports Equipment",
            Category::Other => "Other",
        }
    }
}

impl ItemStatus {
    fn rank(&self) -> u8 {
        match self {
            ItemStatus::Active => 0,
            ItemStatus::Claimed => 1,
            ItemStatus::Resolved => 2,
        }
    }

    /// `true` if `next` is strictly later in the lifecycle.
    pub fn can_advance_to(&self, next: ItemStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl Default for Urgency {
    fn default() -> Self {
        Urgency::Medium
    }
}

/// A listing as held by the directory and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
    /// Day the listing was posted.
    pub date: NaiveDate,
    pub status: ItemStatus,
    /// Email of the poster; drives "my posts" ownership.
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Day the item was lost or found, as entered by the poster.
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

impl Item {
    /// A reward only counts when it is strictly positive.
    pub fn has_reward(&self) -> bool {
        self.reward.is_some_and(|r| r > 0.0)
    }
}

/// Request payload for creating or replacing an item. Everything but the
/// server-assigned `id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub location: String,
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

impl From<&Item> for NewItem {
    fn from(item: &Item) -> Self {
        Self {
            item_type: item.item_type,
            title: item.title.clone(),
            description: item.description.clone(),
            category: item.category,
            location: item.location.clone(),
            date: item.date,
            status: item.status,
            contact: item.contact.clone(),
            image: item.image.clone(),
            occurred_on: item.occurred_on,
            urgency: item.urgency,
            reward: item.reward,
            condition: item.condition,
            storage_location: item.storage_location.clone(),
        }
    }
}
