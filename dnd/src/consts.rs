//! Shared numeric constants and ids for the drag-and-drop crate.

// ── Activation ──────────────────────────────────────────────────

/// Mouse movement in CSS pixels a press must reach before it becomes a drag.
pub const MOUSE_ACTIVATION_DISTANCE_PX: f64 = 5.0;

/// How long a touch must be held before it becomes a drag.
pub const TOUCH_ACTIVATION_DELAY_MS: u64 = 250;

/// Movement allowed during the touch hold before it is treated as a scroll.
pub const TOUCH_ACTIVATION_TOLERANCE_PX: f64 = 5.0;

// ── Presentation ────────────────────────────────────────────────

/// Duration of the animated return after a cancelled or rejected drop.
pub const RETURN_TRANSITION_MS: u64 = 250;

/// Opacity of the source item while its drag is active.
pub const ACTIVE_ITEM_OPACITY: f64 = 0.5;

// ── Ids ─────────────────────────────────────────────────────────

/// Id of the card form's single "selected tag" slot.
pub const SELECTED_AREA_ZONE_ID: &str = "selected-area";
