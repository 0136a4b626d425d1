//! Error types shared by the API client and the dashboard forms.
//!
//! Nothing here is retried automatically. `retryable()` only tells the UI
//! whether offering a "try again" is meaningful.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Message shown when the backend fails without saying why.
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Stable machine-readable code plus retry hint for an error.
pub trait ErrorCode {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// API
// =============================================================================

/// Failures talking to the content backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request did not complete (connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(String),

    /// The backend answered with a non-success HTTP status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The backend answered `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The response body did not match the expected envelope.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// A multipart part could not be built from the upload.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Rejected { .. } => "E_REJECTED",
            Self::Decode(_) => "E_DECODE",
            Self::InvalidUpload(_) => "E_INVALID_UPLOAD",
            Self::HttpClientBuild(_) => "E_HTTP_CLIENT_BUILD",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

// =============================================================================
// FORMS
// =============================================================================

/// A form refused to submit. Raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a tag")]
    NoTagSelected,
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),
    #[error("Please choose an image")]
    MissingImage,
    #[error("Text ID not found")]
    MissingTextId,
    #[error("unknown tag `{0}`")]
    UnknownTag(String),
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("field `{field}` expects {expected}")]
    WrongType { field: String, expected: &'static str },
    #[error("document could not be edited: {0}")]
    Malformed(String),
}

/// Why a dashboard form submission failed.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ErrorCode for SubmitError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::Api(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Validation(_) => false,
            Self::Api(e) => e.retryable(),
        }
    }
}
