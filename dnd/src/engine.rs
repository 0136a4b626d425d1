//! Tag assignment controller.
//!
//! `TagBoard` turns pointer and key input into [`Action`]s for the host. It owns
//! no clock and no renderer: time arrives with each event and drawing is driven
//! by the returned actions.

use std::collections::HashMap;

use crate::assignment::Assignment;
use crate::collision::closest_center;
use crate::doc::{Tag, TagId, TagSnapshot};
use crate::draggable::{Draggable, ItemStyle};
use crate::geometry::{Point, Rect};
use crate::input::{
    ActivationPolicy, Button, GestureEvent, GesturePhase, InputAdapter, InputState, Key, PointerId, PointerKind,
};
use crate::overlay::{OverlayView, overlay};
use crate::session::DragSession;
use crate::zone::{DropZone, ZoneId, ZoneView};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    DragStarted { tag_id: TagId },
    CandidateChanged { zone_id: Option<ZoneId> },
    /// A zone accepted the drop. Raised on every accept, including a re-drop
    /// of the tag that is already selected.
    Assigned(Tag),
    DropRejected { tag_id: TagId },
    DragCancelled { tag_id: TagId },
    SelectionCleared,
    RenderNeeded,
}

/// Tag assignment controller.
///
/// Owns the available-tags snapshot, the registered geometry, the gesture
/// adapter, the optional drag session, and the authoritative assignment.
/// Every handler is synchronous and returns the actions it produced.
#[derive(Debug, Clone, Default)]
pub struct TagBoard {
    tags: TagSnapshot,
    items: Vec<Draggable>,
    item_rects: HashMap<TagId, Rect>,
    zones: Vec<DropZone>,
    input: InputAdapter,
    session: Option<DragSession>,
    assignment: Assignment,
    /// Item under the press that has not activated yet.
    pressed: Option<TagId>,
}

impl TagBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(policy: ActivationPolicy) -> Self {
        Self { input: InputAdapter::new(policy), ..Self::default() }
    }

    // --- Data inputs ---

    /// Install the available-tags snapshot. Any drag in progress is dropped and
    /// a selection that is not part of the new snapshot is cleared.
    pub fn load_tags(&mut self, tags: Vec<Tag>) -> Vec<Action> {
        let mut actions = Vec::new();
        if let Some(cancelled) = self.abort_drag() {
            actions.push(cancelled);
        }
        self.tags = TagSnapshot::new(tags);
        self.items = self.tags.tags().iter().cloned().map(Draggable::new).collect();
        self.item_rects.retain(|id, _| self.tags.contains(id));

        let stale = self.assignment.selected().is_some_and(|tag| self.tags.get(&tag.id) != Some(tag));
        if stale && self.assignment.clear().changed() {
            actions.push(Action::SelectionCleared);
        }
        tracing::debug!(count = self.tags.len(), "tag snapshot loaded");
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Record where an item is laid out in the list.
    pub fn set_item_rect(&mut self, id: &TagId, rect: Rect) {
        if !self.tags.contains(id) {
            tracing::warn!(tag_id = %id, "layout reported for unknown tag");
            return;
        }
        self.item_rects.insert(id.clone(), rect);
    }

    /// Register a drop zone, replacing any zone with the same id.
    pub fn add_zone(&mut self, zone: DropZone) {
        if let Some(existing) = self.zones.iter_mut().find(|z| z.id == zone.id) {
            *existing = zone;
        } else {
            self.zones.push(zone);
        }
    }

    // --- Input events ---

    pub fn on_pointer_down(
        &mut self,
        pointer_id: PointerId,
        kind: PointerKind,
        button: Button,
        position: Point,
        at_ms: u64,
    ) -> Vec<Action> {
        if self.session.is_some() || self.pressed.is_some() {
            return Vec::new();
        }
        let Some(tag_id) = self.item_at(position) else {
            return Vec::new();
        };
        self.pressed = Some(tag_id);
        let events = self.input.pointer_down(pointer_id, kind, button, position, at_ms);
        if matches!(self.input.state(), InputState::Idle) {
            self.pressed = None;
        }
        self.apply(events)
    }

    pub fn on_pointer_move(&mut self, pointer_id: PointerId, position: Point, at_ms: u64) -> Vec<Action> {
        let events = self.input.pointer_move(pointer_id, position, at_ms);
        let actions = self.apply(events);
        self.forget_abandoned_press();
        actions
    }

    pub fn on_pointer_up(&mut self, pointer_id: PointerId, position: Point, at_ms: u64) -> Vec<Action> {
        let events = self.input.pointer_up(pointer_id, position, at_ms);
        let actions = self.apply(events);
        self.forget_abandoned_press();
        actions
    }

    /// Host timer tick; lets a stationary touch hold activate.
    pub fn on_tick(&mut self, at_ms: u64) -> Vec<Action> {
        let events = self.input.tick(at_ms);
        self.apply(events)
    }

    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        let events = self.input.pointer_cancel(pointer_id);
        let actions = self.apply(events);
        self.forget_abandoned_press();
        actions
    }

    /// The pointer left the interactive surface without a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let events = self.input.cancel();
        self.pressed = None;
        self.apply(events)
    }

    pub fn on_key_down(&mut self, key: &Key) -> Vec<Action> {
        if !key.is_escape() {
            return Vec::new();
        }
        self.on_pointer_leave()
    }

    /// Host finished animating an item back to rest.
    pub fn finish_return(&mut self, id: &TagId) {
        if let Some(item) = self.item_mut(id) {
            item.finish_return();
        }
    }

    // --- Form-driven transitions ---

    /// Operator pressed the remove control on the selected tag.
    pub fn clear_selection(&mut self) -> Vec<Action> {
        if self.assignment.clear().changed() {
            tracing::debug!("selection cleared");
            return vec![Action::SelectionCleared, Action::RenderNeeded];
        }
        Vec::new()
    }

    /// The card was created; the form resets.
    pub fn submit_succeeded(&mut self) -> Vec<Action> {
        if self.assignment.submit_success().changed() {
            return vec![Action::SelectionCleared, Action::RenderNeeded];
        }
        Vec::new()
    }

    // --- Queries ---

    #[must_use]
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Tag> {
        self.assignment.selected()
    }

    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// All tags in list order. Selection never removes a tag from this list.
    #[must_use]
    pub fn available(&self) -> &[Tag] {
        self.tags.tags()
    }

    #[must_use]
    pub fn tag(&self, id: &TagId) -> Option<&Tag> {
        self.tags.get(id)
    }

    #[must_use]
    pub fn items(&self) -> &[Draggable] {
        &self.items
    }

    #[must_use]
    pub fn item_rect(&self, id: &TagId) -> Option<Rect> {
        self.item_rects.get(id).copied()
    }

    #[must_use]
    pub fn item_style(&self, id: &TagId) -> Option<ItemStyle> {
        self.items.iter().find(|item| &item.tag().id == id).map(Draggable::style)
    }

    #[must_use]
    pub fn zones(&self) -> &[DropZone] {
        &self.zones
    }

    #[must_use]
    pub fn zone_view(&self, id: &ZoneId) -> Option<ZoneView> {
        self.zones
            .iter()
            .find(|z| &z.id == id)
            .map(|z| z.view(&self.assignment, self.session.as_ref()))
    }

    #[must_use]
    pub fn overlay(&self) -> Option<OverlayView> {
        overlay(self.session.as_ref(), &self.tags)
    }

    /// Whether the host should swallow the click on the pressed element.
    #[must_use]
    pub fn suppresses_click(&self) -> bool {
        self.input.suppresses_click()
    }

    // --- Internals ---

    fn item_at(&self, position: Point) -> Option<TagId> {
        self.tags
            .tags()
            .iter()
            .find(|tag| self.item_rects.get(&tag.id).is_some_and(|r| r.contains(position)))
            .map(|tag| tag.id.clone())
    }

    fn item_mut(&mut self, id: &TagId) -> Option<&mut Draggable> {
        self.items.iter_mut().find(|item| &item.tag().id == id)
    }

    fn forget_abandoned_press(&mut self) {
        if self.session.is_none() && matches!(self.input.state(), InputState::Idle) {
            self.pressed = None;
        }
    }

    fn apply(&mut self, events: Vec<GestureEvent>) -> Vec<Action> {
        let mut actions = Vec::new();
        for event in events {
            match event.phase {
                GesturePhase::Start => self.start(event, &mut actions),
                GesturePhase::Move => self.track(event.position, &mut actions),
                GesturePhase::End => self.end(event.position, &mut actions),
                GesturePhase::Cancel => {
                    if let Some(action) = self.abort_drag() {
                        actions.push(action);
                        actions.push(Action::RenderNeeded);
                    }
                }
            }
        }
        actions
    }

    fn start(&mut self, event: GestureEvent, actions: &mut Vec<Action>) {
        let Some(tag_id) = self.pressed.take() else {
            return;
        };
        let Some(source_rect) = self.item_rects.get(&tag_id).copied() else {
            tracing::warn!(tag_id = %tag_id, "drag started on item without layout");
            self.input.cancel();
            return;
        };
        let mut session = DragSession::new(tag_id.clone(), event.pointer_id, event.position, source_rect);
        session.candidate_target_id = closest_center(session.pointer(), session.dragged_rect(), &self.zones);
        self.session = Some(session);
        if let Some(item) = self.item_mut(&tag_id) {
            item.begin();
        }
        tracing::debug!(tag_id = %tag_id, pointer_id = event.pointer_id, "drag started");
        actions.push(Action::DragStarted { tag_id });
        actions.push(Action::RenderNeeded);
    }

    fn track(&mut self, position: Point, actions: &mut Vec<Action>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.track(position);
        let candidate = closest_center(session.pointer(), session.dragged_rect(), &self.zones);
        let changed = candidate != session.candidate_target_id;
        session.candidate_target_id = candidate.clone();
        let tag_id = session.active_item_id.clone();
        let offset = session.pointer_offset;
        if let Some(item) = self.item_mut(&tag_id) {
            item.track(offset);
        }
        if changed {
            actions.push(Action::CandidateChanged { zone_id: candidate });
        }
        actions.push(Action::RenderNeeded);
    }

    fn end(&mut self, position: Point, actions: &mut Vec<Action>) {
        if self.session.is_none() {
            return;
        }
        self.track(position, actions);
        let Some(session) = self.session.take() else {
            return;
        };
        let tag_id = session.active_item_id.clone();

        let assigned = self.tags.get(&tag_id).and_then(|tag| {
            self.zones
                .iter()
                .find_map(|zone| zone.accept(Some(&session), tag))
        });

        let accepted = assigned.is_some();
        match assigned {
            Some(assigned) => {
                let transition = self.assignment.drop_tag(assigned.tag.clone());
                tracing::info!(
                    tag_id = %tag_id,
                    zone_id = %assigned.zone_id,
                    changed = transition.changed(),
                    "tag assigned"
                );
                actions.push(Action::Assigned(assigned.tag));
            }
            None => {
                tracing::debug!(tag_id = %tag_id, "drop rejected; no valid target");
                actions.push(Action::DropRejected { tag_id: tag_id.clone() });
            }
        }
        if let Some(item) = self.item_mut(&tag_id) {
            item.settle(accepted);
        }
        actions.push(Action::RenderNeeded);
    }

    /// Discard the session and revert the item. Assignment is untouched.
    fn abort_drag(&mut self) -> Option<Action> {
        self.pressed = None;
        self.input.cancel();
        let session = self.session.take()?;
        let tag_id = session.active_item_id;
        if let Some(item) = self.item_mut(&tag_id) {
            item.settle(false);
        }
        tracing::debug!(tag_id = %tag_id, "drag cancelled");
        Some(Action::DragCancelled { tag_id })
    }
}
