//! Plain-text rendering of listings.

use std::fmt::Write;

use lostfound_core::{Item, ItemType, Summary};

/// One line per item, as the browse lists show.
pub fn item_line(item: &Item) -> String {
    let mut line = format!(
        "{}  {:<6} {:<9} {}  [{}] @ {}",
        item.id,
        item.item_type,
        item.status,
        item.title,
        item.category.label(),
        item.location
    );
    if let Some(urgency) = item.urgency {
        let _ = write!(line, "  {urgency} priority");
    }
    if let Some(condition) = item.condition {
        let _ = write!(line, "  {condition} condition");
    }
    if item.has_reward() {
        let _ = write!(line, "  ${}", format_reward(item.reward.unwrap_or_default()));
    }
    line
}

pub fn item_detail(item: &Item, is_owner: bool) -> String {
    let verb = match item.item_type {
        ItemType::Lost => "Lost",
        ItemType::Found => "Found",
    };
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", item.title, item.status);
    let _ = writeln!(out, "{}", item.description);
    let _ = writeln!(out, "Category: {}", item.category.label());
    let _ = writeln!(out, "Location: {}", item.location);
    match item.occurred_on {
        Some(day) => {
            let _ = writeln!(out, "{verb} on: {day} (posted {})", item.date);
        }
        None => {
            let _ = writeln!(out, "Posted: {}", item.date);
        }
    }
    if let Some(urgency) = item.urgency {
        let _ = writeln!(out, "Urgency: {urgency}");
    }
    if item.has_reward() {
        let _ = writeln!(out, "Reward: ${}", format_reward(item.reward.unwrap_or_default()));
    }
    if let Some(condition) = item.condition {
        let _ = writeln!(out, "Condition: {condition}");
    }
    if let Some(storage) = &item.storage_location {
        let _ = writeln!(out, "Held at: {storage}");
    }
    if is_owner {
        let _ = writeln!(out, "This is your post.");
    } else {
        let _ = writeln!(out, "Contact: {}", item.contact);
    }
    out
}

pub fn summary_line(summary: &Summary) -> String {
    format!(
        "{} posted ({} lost, {} found), {} active, {} claimed, {} resolved",
        summary.total, summary.lost, summary.found, summary.active, summary.claimed, summary.resolved
    )
}

fn format_reward(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}
