//! Floating proxy of the dragged tag.
//!
//! Purely cosmetic: the overlay is derived from the session on demand and
//! never feeds back into assignment.

use serde::Serialize;

use crate::doc::{TagId, TagSnapshot};
use crate::geometry::Rect;
use crate::session::DragSession;

/// Declarative render input for the overlay layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayView {
    pub tag_id: TagId,
    pub label: String,
    /// Where to draw, above all other content.
    pub rect: Rect,
}

/// The overlay for `session`, or `None` when no drag is active.
#[must_use]
pub fn overlay(session: Option<&DragSession>, tags: &TagSnapshot) -> Option<OverlayView> {
    let session = session?;
    let tag = tags.get(&session.active_item_id)?;
    Some(OverlayView { tag_id: tag.id.clone(), label: tag.name.clone(), rect: session.dragged_rect() })
}
