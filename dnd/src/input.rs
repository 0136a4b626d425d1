//! Input model: pointer kinds, buttons, keys, activation policy, and the
//! gesture state machine.
//!
//! `InputAdapter` turns raw pointer-down/move/up events into normalized
//! `GestureEvent`s. A press only becomes a drag once its activation policy is
//! satisfied; until then it is `Pending` and, if released, is an ordinary
//! click or tap that produces no gesture events at all. The host supplies a
//! millisecond timestamp with every event and calls `tick` while a touch is
//! held still, so no clock is read here.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MOUSE_ACTIVATION_DISTANCE_PX, TOUCH_ACTIVATION_DELAY_MS, TOUCH_ACTIVATION_TOLERANCE_PX};
use crate::geometry::Point;

/// Browser-assigned pointer identifier.
pub type PointerId = i32;

/// Device class of a pointer. Selects the activation policy for a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger touch).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// A keyboard key as reported by the browser (e.g. `"Escape"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_escape(&self) -> bool {
        self.0 == "Escape" || self.0 == "Esc"
    }
}

/// Thresholds that separate a drag from a click or a scroll.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivationPolicy {
    /// Mouse: displacement from the press point that must be exceeded.
    pub mouse_distance_px: f64,
    /// Touch: minimum hold time before activation.
    pub touch_delay_ms: u64,
    /// Touch: displacement allowed during the hold.
    pub touch_tolerance_px: f64,
}

impl Default for ActivationPolicy {
    fn default() -> Self {
        Self {
            mouse_distance_px: MOUSE_ACTIVATION_DISTANCE_PX,
            touch_delay_ms: TOUCH_ACTIVATION_DELAY_MS,
            touch_tolerance_px: TOUCH_ACTIVATION_TOLERANCE_PX,
        }
    }
}

/// Phase of a normalized gesture event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GesturePhase {
    Start,
    Move,
    End,
    Cancel,
}

/// A normalized gesture event delivered to the rest of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureEvent {
    pub phase: GesturePhase,
    pub pointer_id: PointerId,
    pub position: Point,
}

impl GestureEvent {
    fn new(phase: GesturePhase, pointer_id: PointerId, position: Point) -> Self {
        Self { phase, pointer_id, position }
    }
}

/// Internal state for the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No press in progress.
    #[default]
    Idle,
    /// A press that has not yet met its activation policy.
    Pending {
        /// Pointer that owns the press.
        pointer_id: PointerId,
        /// Policy selector for this press.
        kind: PointerKind,
        /// Where the press began.
        origin: Point,
        /// Most recent pointer position.
        last: Point,
        /// Timestamp of the press.
        pressed_at_ms: u64,
    },
    /// An activated drag gesture.
    Active {
        /// Pointer that owns the gesture.
        pointer_id: PointerId,
        /// Where the press began; `Start` was reported here.
        origin: Point,
        /// Most recent pointer position.
        last: Point,
    },
}

/// Normalizes mouse and touch input into `GestureEvent`s.
#[derive(Debug, Clone, Default)]
pub struct InputAdapter {
    policy: ActivationPolicy,
    state: InputState,
}

impl InputAdapter {
    #[must_use]
    pub fn new(policy: ActivationPolicy) -> Self {
        Self { policy, state: InputState::Idle }
    }

    #[must_use]
    pub fn policy(&self) -> ActivationPolicy {
        self.policy
    }

    #[must_use]
    pub fn state(&self) -> InputState {
        self.state
    }

    /// Whether click/tap handling on the originating element must be skipped.
    #[must_use]
    pub fn suppresses_click(&self) -> bool {
        matches!(self.state, InputState::Active { .. })
    }

    /// Begin tracking a press. A second press while one is pending or active
    /// is ignored, as is any non-primary mouse button.
    pub fn pointer_down(
        &mut self,
        pointer_id: PointerId,
        kind: PointerKind,
        button: Button,
        position: Point,
        at_ms: u64,
    ) -> Vec<GestureEvent> {
        if !matches!(self.state, InputState::Idle) {
            tracing::debug!(pointer_id, "press ignored; another gesture owns the surface");
            return Vec::new();
        }
        if button != Button::Primary {
            return Vec::new();
        }
        self.state = InputState::Pending { pointer_id, kind, origin: position, last: position, pressed_at_ms: at_ms };

        // Zero thresholds activate on the press itself.
        let immediate = match kind {
            PointerKind::Mouse => self.policy.mouse_distance_px <= 0.0,
            PointerKind::Touch => self.policy.touch_delay_ms == 0,
        };
        if immediate {
            return vec![self.activate(pointer_id, position, position)];
        }
        Vec::new()
    }

    /// Track pointer movement.
    pub fn pointer_move(&mut self, pointer_id: PointerId, position: Point, at_ms: u64) -> Vec<GestureEvent> {
        match self.state {
            InputState::Idle => Vec::new(),
            InputState::Active { pointer_id: owner, origin, .. } => {
                if owner != pointer_id {
                    return Vec::new();
                }
                self.state = InputState::Active { pointer_id, origin, last: position };
                vec![GestureEvent::new(GesturePhase::Move, pointer_id, position)]
            }
            InputState::Pending { pointer_id: owner, kind, origin, last, pressed_at_ms } => {
                if owner != pointer_id {
                    return Vec::new();
                }
                match kind {
                    PointerKind::Mouse => {
                        let moved = position.offset_from(origin).length();
                        if moved > self.policy.mouse_distance_px {
                            let start = self.activate(pointer_id, origin, position);
                            return vec![start, GestureEvent::new(GesturePhase::Move, pointer_id, position)];
                        }
                        self.state = InputState::Pending { pointer_id, kind, origin, last: position, pressed_at_ms };
                        Vec::new()
                    }
                    PointerKind::Touch => {
                        // The hold timer would have fired before this move arrived.
                        if self.hold_elapsed(pressed_at_ms, at_ms) {
                            let start = self.activate(pointer_id, origin, last);
                            self.state = InputState::Active { pointer_id, origin, last: position };
                            return vec![start, GestureEvent::new(GesturePhase::Move, pointer_id, position)];
                        }
                        if position.offset_from(origin).length() > self.policy.touch_tolerance_px {
                            tracing::trace!(pointer_id, "touch drifted before hold delay; treating as scroll");
                            self.state = InputState::Idle;
                            return Vec::new();
                        }
                        self.state = InputState::Pending { pointer_id, kind, origin, last: position, pressed_at_ms };
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Advance time for a stationary touch hold.
    pub fn tick(&mut self, at_ms: u64) -> Vec<GestureEvent> {
        if let InputState::Pending { pointer_id, kind: PointerKind::Touch, origin, last, pressed_at_ms } = self.state {
            if self.hold_elapsed(pressed_at_ms, at_ms) {
                return vec![self.activate(pointer_id, origin, last)];
            }
        }
        Vec::new()
    }

    /// Finish a press. A press that never activated yields no events: it was
    /// a plain click or tap.
    pub fn pointer_up(&mut self, pointer_id: PointerId, position: Point, at_ms: u64) -> Vec<GestureEvent> {
        match self.state {
            InputState::Idle => Vec::new(),
            InputState::Active { pointer_id: owner, .. } => {
                if owner != pointer_id {
                    return Vec::new();
                }
                self.state = InputState::Idle;
                vec![GestureEvent::new(GesturePhase::End, pointer_id, position)]
            }
            InputState::Pending { pointer_id: owner, kind, origin, last, pressed_at_ms } => {
                if owner != pointer_id {
                    return Vec::new();
                }
                if kind == PointerKind::Touch && self.hold_elapsed(pressed_at_ms, at_ms) {
                    let start = self.activate(pointer_id, origin, last);
                    self.state = InputState::Idle;
                    return vec![start, GestureEvent::new(GesturePhase::End, pointer_id, position)];
                }
                self.state = InputState::Idle;
                Vec::new()
            }
        }
    }

    /// Browser `pointercancel` for a specific pointer.
    pub fn pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<GestureEvent> {
        let owner = match self.state {
            InputState::Idle => return Vec::new(),
            InputState::Pending { pointer_id, .. } | InputState::Active { pointer_id, .. } => pointer_id,
        };
        if owner != pointer_id {
            return Vec::new();
        }
        self.cancel()
    }

    /// Abort whatever is in progress (escape key, pointer left the surface).
    /// Only an active gesture reports `Cancel`; a pending press is dropped.
    pub fn cancel(&mut self) -> Vec<GestureEvent> {
        let prev = std::mem::take(&mut self.state);
        match prev {
            InputState::Active { pointer_id, last, .. } => {
                vec![GestureEvent::new(GesturePhase::Cancel, pointer_id, last)]
            }
            InputState::Idle | InputState::Pending { .. } => Vec::new(),
        }
    }

    fn hold_elapsed(&self, pressed_at_ms: u64, at_ms: u64) -> bool {
        at_ms.saturating_sub(pressed_at_ms) >= self.policy.touch_delay_ms
    }

    fn activate(&mut self, pointer_id: PointerId, origin: Point, last: Point) -> GestureEvent {
        self.state = InputState::Active { pointer_id, origin, last };
        GestureEvent::new(GesturePhase::Start, pointer_id, origin)
    }
}
