//! Recording in-memory backend for form tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use dnd::doc::Tag;

use super::Backend;
use super::types::{Card, Feedback, HomeContent, HomeText, NewCard, NewFeedback};
use crate::error::ApiError;

/// A call the fake received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListTags,
    ListCards,
    CreateCard(NewCard),
    ListFeedback,
    CreateFeedback(NewFeedback),
    HomeText,
    UpdateHomeText { id: String, content: HomeContent },
}

#[derive(Default)]
pub struct FakeBackend {
    pub tags: Vec<Tag>,
    pub cards: Vec<Card>,
    pub feedback: Vec<Feedback>,
    pub text: Option<HomeText>,
    /// Returned by the next write instead of success.
    fail_writes: Mutex<Option<ApiError>>,
    fail_reads: bool,
    calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn with_tags(tags: Vec<Tag>) -> Self {
        Self { tags, ..Self::default() }
    }

    pub fn with_text(text: HomeText) -> Self {
        Self { text: Some(text), ..Self::default() }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Every read fails as a transport error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn fail_next_write(&self, err: ApiError) {
        *lock(&self.fail_writes) = Some(err);
    }

    pub fn calls(&self) -> Vec<Call> {
        lock(&self.calls).clone()
    }

    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::CreateCard(_) | Call::CreateFeedback(_) | Call::UpdateHomeText { .. }))
            .collect()
    }

    fn record(&self, call: Call) {
        lock(&self.calls).push(call);
    }

    fn read<T: Clone>(&self, value: &T) -> Result<T, ApiError> {
        if self.fail_reads {
            return Err(ApiError::Transport("connection refused".into()));
        }
        Ok(value.clone())
    }

    fn write(&self) -> Result<(), ApiError> {
        lock(&self.fail_writes).take().map_or(Ok(()), Err)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[async_trait]
impl Backend for FakeBackend {
    async fn list_tags(&self) -> Result<Vec<Tag>, ApiError> {
        self.record(Call::ListTags);
        self.read(&self.tags)
    }

    async fn list_cards(&self) -> Result<Vec<Card>, ApiError> {
        self.record(Call::ListCards);
        self.read(&self.cards)
    }

    async fn create_card(&self, card: NewCard) -> Result<(), ApiError> {
        self.record(Call::CreateCard(card));
        self.write()
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, ApiError> {
        self.record(Call::ListFeedback);
        self.read(&self.feedback)
    }

    async fn create_feedback(&self, feedback: NewFeedback) -> Result<(), ApiError> {
        self.record(Call::CreateFeedback(feedback));
        self.write()
    }

    async fn home_text(&self) -> Result<HomeText, ApiError> {
        self.record(Call::HomeText);
        match &self.text {
            Some(text) => self.read(text),
            None => Err(ApiError::Status { status: 404, message: "Text not found".into() }),
        }
    }

    async fn update_home_text(&self, id: &str, content: &HomeContent) -> Result<(), ApiError> {
        self.record(Call::UpdateHomeText { id: id.to_owned(), content: content.clone() });
        self.write()
    }
}
