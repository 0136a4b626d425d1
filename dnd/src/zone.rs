//! Single-slot drop zone.
//!
//! A zone owns only its id and geometry. Its content is derived from the
//! assignment state so there is one source of truth for the selected tag.

#[cfg(test)]
#[path = "zone_test.rs"]
mod zone_test;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::doc::Tag;
use crate::geometry::Rect;
use crate::session::DragSession;

/// Identifier of a droppable region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub String);

impl ZoneId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A registered drop region.
#[derive(Debug, Clone, PartialEq)]
pub struct DropZone {
    pub id: ZoneId,
    pub rect: Rect,
}

/// Raised when a zone accepts a drop.
#[derive(Debug, Clone, PartialEq)]
pub struct Assigned {
    pub zone_id: ZoneId,
    pub tag: Tag,
}

/// What the zone shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ZoneContent {
    /// "Drop tag here".
    Empty,
    Occupied { tag: Tag },
}

/// Declarative render input for a zone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneView {
    pub id: ZoneId,
    pub content: ZoneContent,
    /// The active drag currently resolves to this zone.
    pub highlighted: bool,
}

impl DropZone {
    #[must_use]
    pub fn new(id: impl Into<String>, rect: Rect) -> Self {
        Self { id: ZoneId(id.into()), rect }
    }

    /// A drop is accepted only during a drag whose resolved candidate is this zone.
    #[must_use]
    pub fn accepts(&self, session: Option<&DragSession>) -> bool {
        session.is_some_and(|s| s.candidate_target_id.as_ref() == Some(&self.id))
    }

    /// Accept `tag` if the session resolves here.
    #[must_use]
    pub fn accept(&self, session: Option<&DragSession>, tag: &Tag) -> Option<Assigned> {
        if !self.accepts(session) {
            return None;
        }
        Some(Assigned { zone_id: self.id.clone(), tag: tag.clone() })
    }

    #[must_use]
    pub fn view(&self, assignment: &Assignment, session: Option<&DragSession>) -> ZoneView {
        let content = match assignment.selected() {
            Some(tag) => ZoneContent::Occupied { tag: tag.clone() },
            None => ZoneContent::Empty,
        };
        ZoneView { id: self.id.clone(), content, highlighted: self.accepts(session) }
    }
}
