//! Headless drag-and-drop engine for assigning a tag to a new portfolio card.
//!
//! The crate owns the whole drag lifecycle without touching a DOM or a
//! renderer: the host feeds raw pointer/key events with millisecond
//! timestamps into [`engine::TagBoard`], receives [`engine::Action`]s back,
//! and re-renders from the declarative view values (`ItemStyle`, `ZoneView`,
//! `OverlayView`) the board exposes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | `TagBoard` controller wiring every other module together |
//! | [`doc`] | `Tag` wire type and the read-only available-tags snapshot |
//! | [`geometry`] | Points, rectangles, and distance helpers |
//! | [`input`] | Pointer kinds, activation policies, and the gesture state machine |
//! | [`session`] | The ephemeral `DragSession` record |
//! | [`draggable`] | Per-tag transform and style |
//! | [`zone`] | Single-slot drop zone |
//! | [`collision`] | Nearest-center target resolution |
//! | [`assignment`] | Authoritative `Empty` / `Selected(tag)` state machine |
//! | [`overlay`] | Floating proxy shown under the pointer |
//! | [`consts`] | Shared thresholds and ids |

pub mod assignment;
pub mod collision;
pub mod consts;
pub mod doc;
pub mod draggable;
pub mod engine;
pub mod geometry;
pub mod input;
pub mod overlay;
pub mod session;
pub mod zone;
