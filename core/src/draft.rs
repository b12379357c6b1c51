//! User-supplied field sets for items that have not been persisted yet.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{Category, Condition, ItemStatus, ItemType, NewItem, Urgency};

/// Fields collected by the posting forms.
///
/// `date` is the day the item was lost or found. It is required for both
/// item types but does not become the listing's `date`, which the directory
/// stamps at creation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemDraft {
    pub item_type: Option<ItemType>,
    pub title: String,
    pub category: Option<Category>,
    pub description: String,
    pub location: String,
    pub date: Option<NaiveDate>,
    pub image: Option<String>,
    pub urgency: Option<Urgency>,
    pub reward: Option<f64>,
    pub condition: Option<Condition>,
    pub storage_location: String,
}

impl ItemDraft {
    /// An empty lost-item draft with the form's default urgency.
    pub fn lost() -> Self {
        Self {
            item_type: Some(ItemType::Lost),
            urgency: Some(Urgency::default()),
            ..Self::default()
        }
    }

    pub fn found() -> Self {
        Self {
            item_type: Some(ItemType::Found),
            ..Self::default()
        }
    }

    /// Check every field the draft's item type requires.
    pub fn validate(&self) -> Result<ItemType, ValidationError> {
        let item_type = self.item_type.ok_or(ValidationError::MissingType)?;
        let missing = |field: &'static str| ValidationError::MissingField { item_type, field };

        if self.title.trim().is_empty() {
            return Err(missing("title"));
        }
        if self.category.is_none() {
            return Err(missing("category"));
        }
        if self.description.trim().is_empty() {
            return Err(missing("description"));
        }
        if item_type == ItemType::Found && self.condition.is_none() {
            return Err(missing("condition"));
        }
        if self.date.is_none() {
            return Err(missing("date"));
        }
        if self.location.trim().is_empty() {
            return Err(missing("location"));
        }
        if item_type == ItemType::Found && self.storage_location.trim().is_empty() {
            return Err(missing("storage location"));
        }
        if let Some(reward) = self.reward {
            if !reward.is_finite() || reward < 0.0 {
                return Err(ValidationError::InvalidReward(reward));
            }
        }
        Ok(item_type)
    }

    /// Validate, then merge with the fields the directory assigns.
    ///
    /// Attributes that belong to the other item type are dropped.
    pub fn into_new_item(self, today: NaiveDate, contact: &str) -> Result<NewItem, ValidationError> {
        let item_type = self.validate()?;
        let category = self.category.ok_or(ValidationError::MissingField {
            item_type,
            field: "category",
        })?;
        let (urgency, reward, condition, storage_location) = match item_type {
            ItemType::Lost => (self.urgency, self.reward, None, None),
            ItemType::Found => (
                None,
                None,
                self.condition,
                Some(self.storage_location.trim().to_string()),
            ),
        };
        Ok(NewItem {
            item_type,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category,
            location: self.location.trim().to_string(),
            date: today,
            status: ItemStatus::Active,
            contact: contact.to_string(),
            image: self.image,
            occurred_on: self.date,
            urgency,
            reward,
            condition,
            storage_location,
        })
    }
}
