//! Forum domain module: wire models for posts and categories, and the
//! composition of an answer on behalf of the current session.
//!
//! No I/O happens here; the gateways in `vetforum-client` move these types
//! over the network.

pub mod answer;
pub mod category;
pub mod post;

pub use answer::{AnswerError, AnswerSubmission};
pub use category::{Category, CategoryDraft};
pub use post::{PostDetail, PostSummary};
