//! Testimonial submission form.

#[cfg(test)]
#[path = "feedback_test.rs"]
mod feedback_test;

use crate::api::Backend;
use crate::api::types::{ImageUpload, NewFeedback};
use crate::error::{ApiError, SubmitError, ValidationError};
use crate::notice::Notice;

const SUBMITTED: &str = "Feedback submitted successfully!";
const SUBMIT_FAILED: &str = "Failed to submit feedback";

#[derive(Debug, Default, Clone)]
pub struct FeedbackForm {
    pub name: String,
    pub company: String,
    pub description: String,
    pub image: Option<ImageUpload>,
    notices: Vec<Notice>,
}

impl FeedbackForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// # Errors
    ///
    /// The first empty field, in form order, then a missing image.
    pub fn validate(&self) -> Result<NewFeedback, ValidationError> {
        for (field, value) in [("name", &self.name), ("company", &self.company), ("description", &self.description)] {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingField(field));
            }
        }
        let image = self.image.clone().ok_or(ValidationError::MissingImage)?;
        Ok(NewFeedback {
            name: self.name.clone(),
            company: self.company.clone(),
            description: self.description.clone(),
            image,
        })
    }

    /// Post the testimonial; fields reset only on success.
    ///
    /// # Errors
    ///
    /// Validation failures before any request, or the backend failure.
    pub async fn submit(&mut self, backend: &dyn Backend) -> Result<(), SubmitError> {
        let feedback = match self.validate() {
            Ok(feedback) => feedback,
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                return Err(e.into());
            }
        };

        if let Err(e) = backend.create_feedback(feedback).await {
            tracing::warn!(error = %e, "feedback submit failed");
            let message = match &e {
                ApiError::Status { message, .. } | ApiError::Rejected { message } => message.clone(),
                _ => SUBMIT_FAILED.to_owned(),
            };
            self.notices.push(Notice::error(message));
            return Err(e.into());
        }

        tracing::info!(company = %self.company, "feedback submitted");
        self.name.clear();
        self.company.clear();
        self.description.clear();
        self.image = None;
        self.notices.push(Notice::success(SUBMITTED));
        Ok(())
    }
}
