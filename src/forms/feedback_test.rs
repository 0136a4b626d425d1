use super::*;
use crate::api::fake::{Call, FakeBackend};

fn filled() -> FeedbackForm {
    FeedbackForm {
        name: "Ada".into(),
        company: "Analytical Engines".into(),
        description: "Shipped on time.".into(),
        image: Some(ImageUpload::new("ada.jpg", "image/jpeg", vec![0xFF, 0xD8])),
        ..FeedbackForm::new()
    }
}

#[tokio::test]
async fn submit_posts_and_resets() {
    let backend = FakeBackend::default();
    let mut form = filled();

    form.submit(&backend).await.unwrap();

    let writes = backend.writes();
    assert_eq!(writes.len(), 1);
    let Call::CreateFeedback(sent) = &writes[0] else {
        panic!("expected feedback create, got {writes:?}");
    };
    assert_eq!(sent.company, "Analytical Engines");
    assert_eq!(sent.image.file_name, "ada.jpg");

    assert!(form.name.is_empty() && form.company.is_empty() && form.description.is_empty());
    assert!(form.image.is_none());
    assert_eq!(form.take_notices(), vec![Notice::success("Feedback submitted successfully!")]);
}

#[tokio::test]
async fn missing_field_blocks_request() {
    let backend = FakeBackend::default();
    let mut form = FeedbackForm { company: "   ".into(), ..filled() };

    let err = form.submit(&backend).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(ValidationError::MissingField("company"))));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn missing_image_blocks_request() {
    let backend = FakeBackend::default();
    let mut form = FeedbackForm { image: None, ..filled() };
    let err = form.submit(&backend).await.unwrap_err();
    assert!(matches!(err, SubmitError::Validation(ValidationError::MissingImage)));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn backend_message_is_surfaced_and_fields_kept() {
    let backend = FakeBackend::default();
    backend.fail_next_write(ApiError::Rejected { message: "Image too large".into() });
    let mut form = filled();

    assert!(form.submit(&backend).await.is_err());
    assert_eq!(form.take_notices(), vec![Notice::error("Image too large")]);
    assert_eq!(form.name, "Ada");
    assert!(form.image.is_some());
}

#[tokio::test]
async fn transport_failure_uses_generic_copy() {
    let backend = FakeBackend::default();
    backend.fail_next_write(ApiError::Decode("eof".into()));
    let mut form = filled();

    assert!(form.submit(&backend).await.is_err());
    assert_eq!(form.take_notices(), vec![Notice::error("Failed to submit feedback")]);
}
