//! `vetforum-core` — shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no I/O, no transport).

pub mod error;
pub mod id;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, PostId, WireId};
pub use value_object::ValueObject;
