use super::*;

#[test]
fn status_and_rejected_display_server_message_verbatim() {
    let err = ApiError::Status { status: 400, message: "Title is required".into() };
    assert_eq!(err.to_string(), "Title is required");
    let err = ApiError::Rejected { message: "Tag not found".into() };
    assert_eq!(err.to_string(), "Tag not found");
}

#[test]
fn api_error_codes() {
    assert_eq!(ApiError::Transport("x".into()).error_code(), "E_TRANSPORT");
    assert_eq!(ApiError::Decode("x".into()).error_code(), "E_DECODE");
    assert_eq!(ApiError::Rejected { message: String::new() }.error_code(), "E_REJECTED");
}

#[test]
fn api_retryable_classification() {
    assert!(ApiError::Transport("reset".into()).retryable());
    assert!(ApiError::Status { status: 503, message: String::new() }.retryable());
    assert!(ApiError::Status { status: 429, message: String::new() }.retryable());
    assert!(!ApiError::Status { status: 400, message: String::new() }.retryable());
    assert!(!ApiError::Rejected { message: String::new() }.retryable());
}

#[test]
fn validation_messages_match_dashboard_copy() {
    assert_eq!(ValidationError::NoTagSelected.to_string(), "Please select a tag");
    assert_eq!(ValidationError::MissingField("title").to_string(), "Please fill in the title field");
    assert_eq!(ValidationError::MissingTextId.to_string(), "Text ID not found");
}

#[test]
fn submit_error_delegates_codes() {
    let err = SubmitError::from(ValidationError::NoTagSelected);
    assert_eq!(err.error_code(), "E_VALIDATION");
    assert!(!err.retryable());
    assert_eq!(err.to_string(), "Please select a tag");

    let err = SubmitError::from(ApiError::Transport("down".into()));
    assert_eq!(err.error_code(), "E_TRANSPORT");
    assert!(err.retryable());
}
