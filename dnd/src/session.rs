//! The ephemeral record of an in-progress drag.
//!
//! A `DragSession` exists exactly while a drag is active: the engine holds an
//! `Option<DragSession>` that is `Some` from `Start` until `End`/`Cancel`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde::{Deserialize, Serialize};

use crate::doc::TagId;
use crate::geometry::{Offset, Point, Rect};
use crate::input::PointerId;
use crate::zone::ZoneId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DragSession {
    /// Tag being dragged.
    pub active_item_id: TagId,
    /// Pointer that owns the drag.
    pub pointer_id: PointerId,
    /// Pointer position when the drag started.
    pub origin: Point,
    /// Current displacement from `origin`.
    pub pointer_offset: Offset,
    /// Resting rectangle of the dragged item in the list.
    pub source_rect: Rect,
    /// Zone the pointer currently resolves to, recomputed every move.
    pub candidate_target_id: Option<ZoneId>,
}

impl DragSession {
    #[must_use]
    pub fn new(active_item_id: TagId, pointer_id: PointerId, origin: Point, source_rect: Rect) -> Self {
        Self {
            active_item_id,
            pointer_id,
            origin,
            pointer_offset: Offset::ZERO,
            source_rect,
            candidate_target_id: None,
        }
    }

    /// Current pointer position.
    #[must_use]
    pub fn pointer(&self) -> Point {
        Point { x: self.origin.x + self.pointer_offset.dx, y: self.origin.y + self.pointer_offset.dy }
    }

    /// Bounding box of the dragged item at its current offset.
    #[must_use]
    pub fn dragged_rect(&self) -> Rect {
        self.source_rect.translated(self.pointer_offset)
    }

    /// Record a new pointer position.
    pub fn track(&mut self, position: Point) {
        self.pointer_offset = position.offset_from(self.origin);
    }
}
