//! Dashboard forms. Each form owns its field state, validates before touching
//! the network, and reports outcomes as [`crate::notice::Notice`]s.

pub mod card;
pub mod feedback;
pub mod text;

pub use card::CardForm;
pub use feedback::FeedbackForm;
pub use text::TextForm;
