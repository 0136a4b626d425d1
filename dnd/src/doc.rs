//! Tag model and the read-only snapshot of available tags.
//!
//! Tags arrive from the backend once per form mount. The snapshot is never
//! mutated by drag operations: dropping a tag into the selection slot does
//! not remove it from the list, and a replaced tag is still available.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque, stable tag identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub String);

impl TagId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TagId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// A tag as stored in the snapshot and on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Backend identifier.
    #[serde(rename = "_id")]
    pub id: TagId,
    /// Display name.
    #[serde(rename = "tagName")]
    pub name: String,
    /// URL-safe identifier.
    #[serde(default)]
    pub slug: String,
}

impl Tag {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self { id: TagId(id.into()), name: name.into(), slug: slug.into() }
    }
}

/// Ordered, immutable list of available tags with id lookup.
#[derive(Debug, Clone, Default)]
pub struct TagSnapshot {
    tags: Vec<Tag>,
    index: HashMap<TagId, usize>,
}

impl TagSnapshot {
    /// Build a snapshot. When ids repeat, the first occurrence wins.
    #[must_use]
    pub fn new(tags: Vec<Tag>) -> Self {
        let mut kept = Vec::with_capacity(tags.len());
        let mut index = HashMap::with_capacity(tags.len());
        for tag in tags {
            if index.contains_key(&tag.id) {
                tracing::warn!(tag_id = %tag.id, "duplicate tag id in snapshot; keeping first");
                continue;
            }
            index.insert(tag.id.clone(), kept.len());
            kept.push(tag);
        }
        Self { tags: kept, index }
    }

    #[must_use]
    pub fn get(&self, id: &TagId) -> Option<&Tag> {
        self.index.get(id).and_then(|&i| self.tags.get(i))
    }

    #[must_use]
    pub fn contains(&self, id: &TagId) -> bool {
        self.index.contains_key(id)
    }

    /// Tags in backend order.
    #[must_use]
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}
