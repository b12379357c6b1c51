//! Read-only views over a directory snapshot.
//!
//! Every function here is pure and order-preserving. Filters accept any
//! iterator of `&Item` (a `&[Item]` or the `Vec<&Item>` another filter
//! returned), so they compose by nesting. An unspecified criterion (`None`,
//! an empty string, or `false` for the reward flag) matches everything.

use crate::types::{Category, Condition, Item, ItemStatus, ItemType, Urgency};

pub fn by_type<'a, I>(items: I, item_type: ItemType) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().filter(|i| i.item_type == item_type).collect()
}

/// Case-insensitive substring match against title or description.
pub fn search<'a, I>(items: I, query: &str) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let needle = query.to_lowercase();
    items.into_iter().filter(|i| matches_query(i, &needle)).collect()
}

pub fn by_category<'a, I>(items: I, category: Option<Category>) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|i| category.is_none_or(|c| i.category == c))
        .collect()
}

pub fn by_location<'a, I>(items: I, location: Option<&str>) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|i| matches_location(i, location))
        .collect()
}

pub fn by_condition<'a, I>(items: I, condition: Option<Condition>) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|i| condition.is_none_or(|c| i.condition == Some(c)))
        .collect()
}

pub fn by_urgency<'a, I>(items: I, urgency: Option<Urgency>) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|i| urgency.is_none_or(|u| i.urgency == Some(u)))
        .collect()
}

pub fn has_reward<'a, I>(items: I, flag: bool) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().filter(|i| !flag || i.has_reward()).collect()
}

/// Items whose poster is `email`.
pub fn by_owner<'a, I>(items: I, email: &str) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items.into_iter().filter(|i| i.contact == email).collect()
}

/// Up to `limit` other items of the same type and category as `item`.
pub fn similar<'a, I>(items: I, item: &Item, limit: usize) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|i| i.id != item.id && i.item_type == item.item_type && i.category == item.category)
        .take(limit)
        .collect()
}

/// The first `limit` items of a type, in directory order.
pub fn recent<'a, I>(items: I, item_type: ItemType, limit: usize) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    items
        .into_iter()
        .filter(|i| i.item_type == item_type)
        .take(limit)
        .collect()
}

fn matches_query(item: &Item, lowered_query: &str) -> bool {
    lowered_query.is_empty()
        || item.title.to_lowercase().contains(lowered_query)
        || item.description.to_lowercase().contains(lowered_query)
}

fn matches_location(item: &Item, location: Option<&str>) -> bool {
    match location {
        None | Some("") => true,
        Some(l) => item.location == l,
    }
}

/// Everything a browse view can narrow by, combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub item_type: Option<ItemType>,
    pub query: String,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub condition: Option<Condition>,
    pub urgency: Option<Urgency>,
    pub has_reward: bool,
}

impl Criteria {
    /// Criteria for the browse view of one item type.
    pub fn for_type(item_type: ItemType) -> Self {
        Self {
            item_type: Some(item_type),
            ..Self::default()
        }
    }

    pub fn matches(&self, item: &Item) -> bool {
        self.matches_lowered(item, &self.query.to_lowercase())
    }

    pub fn apply<'a, I>(&self, items: I) -> Vec<&'a Item>
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let query = self.query.to_lowercase();
        items
            .into_iter()
            .filter(|i| self.matches_lowered(i, &query))
            .collect()
    }

    fn matches_lowered(&self, item: &Item, lowered_query: &str) -> bool {
        self.item_type.is_none_or(|t| item.item_type == t)
            && matches_query(item, lowered_query)
            && self.category.is_none_or(|c| item.category == c)
            && matches_location(item, self.location.as_deref())
            && self.condition.is_none_or(|c| item.condition == Some(c))
            && self.urgency.is_none_or(|u| item.urgency == Some(u))
            && (!self.has_reward || item.has_reward())
    }

    /// Reset every criterion except the item type.
    pub fn clear(&mut self) {
        *self = Self {
            item_type: self.item_type,
            ..Self::default()
        };
    }

    /// `true` when nothing beyond the item type is being filtered.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.category.is_none()
            && self.location.as_deref().is_none_or(str::is_empty)
            && self.condition.is_none()
            && self.urgency.is_none()
            && !self.has_reward
    }
}

/// Counts shown on dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub lost: usize,
    pub found: usize,
    pub active: usize,
    pub claimed: usize,
    pub resolved: usize,
}

impl Summary {
    pub fn of<'a, I>(items: I) -> Self
    where
        I: IntoIterator<Item = &'a Item>,
    {
        items.into_iter().fold(Self::default(), |mut s, item| {
            s.total += 1;
            match item.item_type {
                ItemType::Lost => s.lost += 1,
                ItemType::Found => s.found += 1,
            }
            match item.status {
                ItemStatus::Active => s.active += 1,
                ItemStatus::Claimed => s.claimed += 1,
                ItemStatus::Resolved => s.resolved += 1,
            }
            s
        })
    }
}
