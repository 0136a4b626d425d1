//! Wire types for the content backend.
//!
//! Field names follow the backend's JSON exactly, including the `_id` keys and
//! the `compnyName` spelling on feedback entries.

use std::path::Path;

use dnd::doc::TagId;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

/// Every backend response is wrapped in this envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// RECORDS
// =============================================================================

/// A portfolio card as listed by `GET /api/v1/cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    /// Hosted image URL.
    pub img: String,
    #[serde(default)]
    pub latest: bool,
    pub tag: TagId,
}

/// A client testimonial.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "compnyName")]
    pub company: String,
    pub description: String,
    #[serde(rename = "imgFeed")]
    pub image: String,
}

/// The homepage text document. `id` is absent on a document that was never
/// saved, which makes it impossible to update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HomeText {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub content: HomeContent,
}

/// Editable sections of the homepage. This is also the PATCH body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HomeContent {
    pub hero: Hero,
    pub expert: Expert,
    pub overview: Overview,
    pub digital_partners: DigitalPartners,
    pub team: Team,
    pub big_section: BigSection,
    pub services: Services,
    pub footer: Footer,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Expert {
    pub paragraph: String,
    pub expertise_types: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Overview {
    pub statistics: OverviewStatistics,
    pub heading: String,
    pub paragraph: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverviewStatistics {
    pub projects: u64,
    pub awards: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DigitalPartners {
    pub title: String,
    pub paragraph: String,
    pub years_in_market: u64,
    pub satisfied_customers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    pub statistics: TeamStatistics,
    pub paragraph: String,
    pub story: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TeamStatistics {
    pub five_star_reviews: u64,
    pub expert_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BigSection {
    pub heading: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Services {
    pub service_types: Vec<ServiceType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceType {
    pub name: String,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Footer {
    pub contact: Contact,
    pub paragraph: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub phone_number: String,
    pub address: String,
    pub email: String,
}

// =============================================================================
// UPLOADS
// =============================================================================

/// A file destined for a multipart part. Name and content type are sent
/// alongside the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    #[must_use]
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), content_type: content_type.into(), bytes }
    }

    /// Read an image from disk, guessing the content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be read.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_owned(), |name| name.to_string_lossy().into_owned());
        Ok(Self { content_type: content_type_for(path).to_owned(), file_name, bytes })
    }
}

/// Content type guessed from a file extension.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Payload for `POST /api/v1/cards`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub title: String,
    pub latest: bool,
    pub tag: TagId,
    pub img: ImageUpload,
}

/// Payload for `POST /api/v1/feedback`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub name: String,
    pub company: String,
    pub description: String,
    pub image: ImageUpload,
}
