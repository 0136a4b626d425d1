//! Portfolio listing: cards joined with their tag names.

#[cfg(test)]
#[path = "portfolio_test.rs"]
mod portfolio_test;

use dnd::doc::{TagId, TagSnapshot};
use serde::Serialize;

use crate::api::Backend;
use crate::api::types::Card;
use crate::error::ApiError;

/// Label for a card whose tag is not in the tag list.
pub const UNKNOWN_TAG: &str = "Unknown Tag";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioEntry {
    pub card_id: String,
    pub title: String,
    pub img: String,
    /// Shows the "Latest" badge.
    pub latest: bool,
    pub tag_id: TagId,
    pub tag_name: String,
}

#[must_use]
pub fn tag_name<'a>(tags: &'a TagSnapshot, id: &TagId) -> &'a str {
    tags.get(id)
        .map(|tag| tag.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(UNKNOWN_TAG)
}

/// Join cards with tag names, keeping card order.
#[must_use]
pub fn join(cards: Vec<Card>, tags: &TagSnapshot) -> Vec<PortfolioEntry> {
    cards
        .into_iter()
        .map(|card| PortfolioEntry {
            tag_name: tag_name(tags, &card.tag).to_owned(),
            card_id: card.id,
            title: card.title,
            img: card.img,
            latest: card.latest,
            tag_id: card.tag,
        })
        .collect()
}

/// Fetch cards and tags concurrently and join them.
///
/// # Errors
///
/// Either fetch failing fails the whole listing.
pub async fn load(backend: &dyn Backend) -> Result<Vec<PortfolioEntry>, ApiError> {
    let (cards, tags) = tokio::join!(backend.list_cards(), backend.list_tags());
    let tags = TagSnapshot::new(tags?);
    let cards = cards?;
    tracing::debug!(cards = cards.len(), tags = tags.len(), "portfolio loaded");
    Ok(join(cards, &tags))
}
