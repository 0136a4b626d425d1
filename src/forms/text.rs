//! Homepage text editor.
//!
//! Fields are addressed by their wire path, e.g. `hero.title`,
//! `overview.statistics.projects` or `expert.expertiseTypes.0`. The edit keeps
//! the field's existing JSON type: numeric fields only accept integers.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use serde_json::Value;

use crate::api::Backend;
use crate::api::types::HomeText;
use crate::error::{ApiError, SubmitError, ValidationError};
use crate::notice::Notice;

const LOAD_FAILED: &str = "Failed to load text data";
const UPDATED: &str = "Homepage text updated successfully!";
const UPDATE_FAILED: &str = "Failed to update text";

#[derive(Debug, Default, Clone)]
pub struct TextForm {
    document: Option<HomeText>,
    notices: Vec<Notice>,
}

impl TextForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Propagates the fetch failure after raising a notice.
    pub async fn load(&mut self, backend: &dyn Backend) -> Result<&HomeText, ApiError> {
        match backend.home_text().await {
            Ok(text) => Ok(&*self.document.insert(text)),
            Err(e) => {
                tracing::warn!(error = %e, "home text fetch failed");
                self.notices.push(Notice::error(LOAD_FAILED));
                Err(e)
            }
        }
    }

    #[must_use]
    pub fn document(&self) -> Option<&HomeText> {
        self.document.as_ref()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Replace one leaf field.
    ///
    /// # Errors
    ///
    /// Unknown path, a value that does not fit the field's type, or no
    /// document loaded.
    pub fn set_field(&mut self, path: &str, raw: &str) -> Result<(), ValidationError> {
        let document = self.document.as_mut().ok_or(ValidationError::MissingTextId)?;
        let mut tree = serde_json::to_value(&document.content).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        let slot = lookup_mut(&mut tree, path)?;
        *slot = coerce(slot, path, raw)?;
        document.content = serde_json::from_value(tree).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        tracing::debug!(path, "home text field set");
        Ok(())
    }

    /// PATCH the document back.
    ///
    /// # Errors
    ///
    /// [`ValidationError::MissingTextId`] when the document has no id; the
    /// backend failure otherwise.
    pub async fn save(&mut self, backend: &dyn Backend) -> Result<(), SubmitError> {
        let Some((id, content)) = self
            .document
            .as_ref()
            .and_then(|doc| doc.id.as_deref().map(|id| (id.to_owned(), doc.content.clone())))
        else {
            let err = ValidationError::MissingTextId;
            self.notices.push(Notice::error(err.to_string()));
            return Err(err.into());
        };

        if let Err(e) = backend.update_home_text(&id, &content).await {
            tracing::warn!(%id, error = %e, "home text update failed");
            let message = match &e {
                ApiError::Status { message, .. } | ApiError::Rejected { message } => message.clone(),
                _ => UPDATE_FAILED.to_owned(),
            };
            self.notices.push(Notice::error(message));
            return Err(e.into());
        }

        tracing::info!(%id, "home text updated");
        self.notices.push(Notice::success(UPDATED));
        Ok(())
    }
}

fn lookup_mut<'a>(tree: &'a mut Value, path: &str) -> Result<&'a mut Value, ValidationError> {
    let unknown = || ValidationError::UnknownField(path.to_owned());
    if path.is_empty() {
        return Err(unknown());
    }
    let mut node = tree;
    for segment in path.split('.') {
        node = match node {
            Value::Object(map) => map.get_mut(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get_mut(i)),
            _ => None,
        }
        .ok_or_else(unknown)?;
    }
    Ok(node)
}

fn coerce(current: &Value, path: &str, raw: &str) -> Result<Value, ValidationError> {
    let wrong = |expected| ValidationError::WrongType { field: path.to_owned(), expected };
    match current {
        Value::String(_) => Ok(Value::String(raw.to_owned())),
        Value::Number(_) => raw.trim().parse::<u64>().map(Value::from).map_err(|_| wrong("a whole number")),
        Value::Bool(_) => raw.trim().parse::<bool>().map(Value::Bool).map_err(|_| wrong("true or false")),
        Value::Null => Ok(Value::String(raw.to_owned())),
        Value::Array(_) | Value::Object(_) => Err(wrong("a leaf field path")),
    }
}
