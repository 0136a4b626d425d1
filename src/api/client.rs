//! reqwest implementation of [`Backend`].
//!
//! Thin HTTP wrapper. Envelope handling lives in `parse_envelope` so it can be
//! tested without a server.

use async_trait::async_trait;
use dnd::doc::Tag;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde::de::{DeserializeOwned, IgnoredAny};

use super::types::{Card, Envelope, Feedback, HomeContent, HomeText, ImageUpload, NewCard, NewFeedback};
use super::{Backend, CARDS_PATH, FEEDBACK_PATH, TAGS_PATH, TEXT_PATH};
use crate::config::StudioConfig;
use crate::error::{ApiError, GENERIC_FAILURE};

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpBackend {
    http: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    /// # Errors
    ///
    /// Returns [`ApiError::HttpClientBuild`] if the TLS backend fails to initialize.
    pub fn new(config: &StudioConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeouts.request())
            .connect_timeout(config.timeouts.connect())
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: config.base_url.clone() })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.http.get(self.url(path)).send().await?;
        let data = read_envelope::<T>(path, response).await?;
        data.ok_or_else(|| ApiError::Decode(format!("{path}: response has no data")))
    }

    async fn post_form(&self, path: &str, form: Form) -> Result<(), ApiError> {
        let response = self.http.post(self.url(path)).multipart(form).send().await?;
        read_envelope::<IgnoredAny>(path, response).await?;
        Ok(())
    }
}

async fn read_envelope<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> Result<Option<T>, ApiError> {
    let status = response.status().as_u16();
    let body = response.text().await?;
    tracing::debug!(path, status, bytes = body.len(), "backend response");
    parse_envelope(status, &body)
}

#[async_trait]
impl Backend for HttpBackend {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.fetch(TAGS_PATH).await
    }

    async fn list_cards(&self) -> Result<Vec<Card>, ApiError> {
        self.fetch(CARDS_PATH).await
    }

    async fn create_card(&self, card: NewCard) -> Result<(), ApiError> {
        let form = Form::new()
            .text("title", card.title)
            .text("latest", card.latest.to_string())
            .text("tag", card.tag.0)
            .part("img", file_part(card.img)?);
        self.post_form(CARDS_PATH, form).await
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.fetch(FEEDBACK_PATH).await
    }

    async fn create_feedback(&self, feedback: NewFeedback) -> Result<(), ApiError> {
        let form = Form::new()
            .text("description", feedback.description)
            .text("compnyName", feedback.company)
            .text("name", feedback.name)
            .part("imgFeed", file_part(feedback.image)?);
        self.post_form(FEEDBACK_PATH, form).await
    }

    async fn home_text(&self) -> Result<HomeText, ApiError> {
        self.fetch(TEXT_PATH).await
    }

    async fn update_home_text(&self, id: &str, content: &HomeContent) -> Result<(), ApiError> {
        let path = format!("{TEXT_PATH}/{id}");
        let response = self.http.patch(self.url(&path)).json(content).send().await?;
        read_envelope::<IgnoredAny>(&path, response).await?;
        Ok(())
    }
}

fn file_part(upload: ImageUpload) -> Result<Part, ApiError> {
    Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(&upload.content_type)
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))
}

// =============================================================================
// PARSING
// =============================================================================

/// Interpret a backend response.
///
/// A non-2xx status becomes [`ApiError::Status`] carrying the body's `message`
/// when one can be read. A 2xx body with `success: false` becomes
/// [`ApiError::Rejected`]. Empty messages fall back to [`GENERIC_FAILURE`].
pub(crate) fn parse_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<ErrorBody>(body).ok().and_then(|b| b.message);
        return Err(ApiError::Status { status, message: message_or_generic(message) });
    }

    let envelope: Envelope<T> = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    if !envelope.success {
        return Err(ApiError::Rejected { message: message_or_generic(envelope.message) });
    }
    Ok(envelope.data)
}

/// Error bodies need not follow the envelope; only `message` is read.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

fn message_or_generic(message: Option<String>) -> String {
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_owned())
}
