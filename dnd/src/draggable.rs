//! A tag in the available list, as a grabbable unit.
//!
//! The item owns its transform. Rendering reads `ItemStyle`; nothing else
//! writes presentation state.

#[cfg(test)]
#[path = "draggable_test.rs"]
mod draggable_test;

use serde::{Deserialize, Serialize};

use crate::consts::{ACTIVE_ITEM_OPACITY, RETURN_TRANSITION_MS};
use crate::doc::Tag;
use crate::geometry::Offset;

/// Visual translation applied to an item, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform { x: 0.0, y: 0.0 };

    /// CSS `transform` value.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("translate3d({}px, {}px, 0)", self.x, self.y)
    }
}

impl From<Offset> for Transform {
    fn from(offset: Offset) -> Self {
        Self { x: offset.dx, y: offset.dy }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemPhase {
    #[default]
    Rest,
    /// Source of the current drag.
    Active,
    /// Animating back to rest after a cancel or rejected drop.
    Returning,
}

/// Declarative render input for an item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemStyle {
    pub transform: Transform,
    pub opacity: f64,
    /// Duration of the CSS transition to apply, if any.
    pub transition_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Draggable {
    tag: Tag,
    transform: Transform,
    phase: ItemPhase,
}

impl Draggable {
    #[must_use]
    pub fn new(tag: Tag) -> Self {
        Self { tag, transform: Transform::IDENTITY, phase: ItemPhase::Rest }
    }

    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn phase(&self) -> ItemPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == ItemPhase::Active
    }

    /// This item became the source of a drag.
    pub fn begin(&mut self) {
        self.phase = ItemPhase::Active;
        self.transform = Transform::IDENTITY;
    }

    /// Follow the pointer 1:1.
    pub fn track(&mut self, offset: Offset) {
        if self.is_active() {
            self.transform = offset.into();
        }
    }

    /// The drag ended. The list is never reordered, so the transform goes back
    /// to identity either way; only a rejected or cancelled drop animates.
    pub fn settle(&mut self, accepted: bool) {
        if !self.is_active() {
            return;
        }
        self.transform = Transform::IDENTITY;
        self.phase = if accepted { ItemPhase::Rest } else { ItemPhase::Returning };
    }

    /// The host finished the return animation.
    pub fn finish_return(&mut self) {
        if self.phase == ItemPhase::Returning {
            self.phase = ItemPhase::Rest;
        }
    }

    #[must_use]
    pub fn style(&self) -> ItemStyle {
        match self.phase {
            ItemPhase::Rest => ItemStyle { transform: self.transform, opacity: 1.0, transition_ms: None },
            ItemPhase::Active => {
                ItemStyle { transform: self.transform, opacity: ACTIVE_ITEM_OPACITY, transition_ms: None }
            }
            ItemPhase::Returning => {
                ItemStyle { transform: self.transform, opacity: 1.0, transition_ms: Some(RETURN_TRANSITION_MS) }
            }
        }
    }
}
