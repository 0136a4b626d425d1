//! Card creation form.
//!
//! SYSTEM CONTEXT
//! ==============
//! Owns one [`TagBoard`] for its lifetime. The board's assignment is the only
//! source of the card's tag: submission reads it at the moment `submit` runs
//! and refuses to reach the network while it is empty.

#[cfg(test)]
#[path = "card_test.rs"]
mod card_test;

use dnd::consts::SELECTED_AREA_ZONE_ID;
use dnd::doc::TagId;
use dnd::engine::{Action, TagBoard};
use dnd::geometry::{Point, Rect};
use dnd::input::{Button, PointerId, PointerKind};
use dnd::zone::DropZone;

use crate::api::Backend;
use crate::api::types::{ImageUpload, NewCard};
use crate::error::{ApiError, SubmitError, ValidationError};
use crate::notice::Notice;

// ── Layout used when the host has not measured anything ─────────

const ZONE_RECT: Rect = Rect { x: 0.0, y: 0.0, width: 320.0, height: 120.0 };
const LIST_TOP: f64 = 160.0;
const ITEM_WIDTH: f64 = 240.0;
const ITEM_HEIGHT: f64 = 32.0;
const ITEM_GAP: f64 = 8.0;

/// Pointer id used for drags the form performs on the operator's behalf.
const SCRIPTED_POINTER: PointerId = 1;
const SCRIPTED_STEP_MS: u64 = 16;

const CREATED: &str = "Card created successfully!";
const LOAD_TAGS_FAILED: &str = "Failed to load tags";
const CREATE_FAILED: &str = "Failed to create card";

#[derive(Debug, Default)]
pub struct CardForm {
    board: TagBoard,
    title: String,
    latest: bool,
    image: Option<ImageUpload>,
    notices: Vec<Notice>,
}

impl CardForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the available tags and lay out the board. A failed fetch leaves
    /// the list empty and raises a notice; it is not retried.
    pub async fn mount(&mut self, backend: &dyn Backend) -> Vec<Action> {
        let tags = match backend.list_tags().await {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!(error = %e, "tag fetch failed");
                self.notices.push(Notice::error(LOAD_TAGS_FAILED));
                Vec::new()
            }
        };
        let actions = self.board.load_tags(tags);
        self.apply_default_layout();
        actions
    }

    /// Register the drop zone and stack the tag items below it.
    pub fn apply_default_layout(&mut self) {
        self.board.add_zone(DropZone::new(SELECTED_AREA_ZONE_ID, ZONE_RECT));
        let ids: Vec<TagId> = self.board.available().iter().map(|t| t.id.clone()).collect();
        let mut y = LIST_TOP;
        for id in &ids {
            self.board.set_item_rect(id, Rect::new(0.0, y, ITEM_WIDTH, ITEM_HEIGHT));
            y += ITEM_HEIGHT + ITEM_GAP;
        }
    }

    /// Drag the tag onto the selection slot with a scripted mouse gesture.
    ///
    /// # Errors
    ///
    /// [`ValidationError::UnknownTag`] if the tag is not in the loaded list.
    pub fn drop_tag(&mut self, id: &TagId, at_ms: u64) -> Result<Vec<Action>, ValidationError> {
        let from = self
            .board
            .item_rect(id)
            .ok_or_else(|| ValidationError::UnknownTag(id.to_string()))?
            .center();
        let to = self
            .board
            .zones()
            .iter()
            .find(|z| z.id.0 == SELECTED_AREA_ZONE_ID)
            .map(|z| z.rect.center())
            .ok_or_else(|| ValidationError::Malformed("no selection slot registered".into()))?;
        let midway = Point::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);

        let mut actions =
            self.board.on_pointer_down(SCRIPTED_POINTER, PointerKind::Mouse, Button::Primary, from, at_ms);
        actions.extend(self.board.on_pointer_move(SCRIPTED_POINTER, midway, at_ms + SCRIPTED_STEP_MS));
        actions.extend(self.board.on_pointer_move(SCRIPTED_POINTER, to, at_ms + 2 * SCRIPTED_STEP_MS));
        actions.extend(self.board.on_pointer_up(SCRIPTED_POINTER, to, at_ms + 3 * SCRIPTED_STEP_MS));
        Ok(actions)
    }

    // --- Fields ---

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_latest(&mut self, latest: bool) {
        self.latest = latest;
    }

    pub fn set_image(&mut self, image: ImageUpload) {
        self.image = Some(image);
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn latest(&self) -> bool {
        self.latest
    }

    #[must_use]
    pub fn image(&self) -> Option<&ImageUpload> {
        self.image.as_ref()
    }

    #[must_use]
    pub fn board(&self) -> &TagBoard {
        &self.board
    }

    /// Host pointer and key events go straight to the board.
    pub fn board_mut(&mut self) -> &mut TagBoard {
        &mut self.board
    }

    /// Drain notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    // --- Submission ---

    /// Build the request payload from the current state without touching it.
    ///
    /// # Errors
    ///
    /// Title and image are checked before the tag.
    pub fn validate(&self) -> Result<NewCard, ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title"));
        }
        let img = self.image.clone().ok_or(ValidationError::MissingImage)?;
        let tag = self.board.selected().ok_or(ValidationError::NoTagSelected)?;
        Ok(NewCard { title: self.title.clone(), latest: self.latest, tag: tag.id.clone(), img })
    }

    /// Create the card. On success the selection and all fields reset; on any
    /// failure the form is left exactly as it was.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Validation`] before any request, or the backend failure.
    pub async fn submit(&mut self, backend: &dyn Backend) -> Result<Vec<Action>, SubmitError> {
        let card = match self.validate() {
            Ok(card) => card,
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };
        let tag_id = card.tag.clone();

        if let Err(e) = backend.create_card(card).await {
            tracing::warn!(%tag_id, error = %e, "card create failed");
            self.notices.push(Notice::error(failure_message(&e)));
            return Err(e.into());
        }

        tracing::info!(%tag_id, "card created");
        self.title.clear();
        self.latest = false;
        self.image = None;
        self.notices.push(Notice::success(CREATED));
        Ok(self.board.submit_succeeded())
    }
}

fn failure_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { message, .. } | ApiError::Rejected { message } => message.clone(),
        _ => CREATE_FAILED.to_owned(),
    }
}
