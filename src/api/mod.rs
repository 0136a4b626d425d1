//! Content backend access.
//!
//! Forms talk to the backend through [`Backend`] so they can be driven by a
//! recording fake in tests and by [`client::HttpBackend`] in the binary.

pub mod client;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

use async_trait::async_trait;
use dnd::doc::Tag;

use crate::error::ApiError;
use types::{Card, Feedback, HomeContent, HomeText, NewCard, NewFeedback};

pub use client::HttpBackend;

pub const TAGS_PATH: &str = "/api/v1/tags";
pub const CARDS_PATH: &str = "/api/v1/cards";
pub const FEEDBACK_PATH: &str = "/api/v1/feedback";
pub const TEXT_PATH: &str = "/api/v1/text";

#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /api/v1/tags`
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError>;

    /// `GET /api/v1/cards`
    async fn list_cards(&self) -> Result<Vec<Card>, ApiError>;

    /// `POST /api/v1/cards` as multipart.
    async fn create_card(&self, card: NewCard) -> Result<(), ApiError>;

    /// `GET /api/v1/feedback`
    async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError>;

    /// `POST /api/v1/feedback` as multipart.
    async fn create_feedback(&self, feedback: NewFeedback) -> Result<(), ApiError>;

    /// `GET /api/v1/text`
    async fn home_text(&self) -> Result<HomeText, ApiError>;

    /// `PATCH /api/v1/text/{id}` with the document minus its id.
    async fn update_home_text(&self, id: &str, content: &HomeContent) -> Result<(), ApiError>;
}
