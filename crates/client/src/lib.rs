//! `vetforum-client`
//!
//! **Responsibility:** thin client shell around the forum/registration API.
//!
//! This crate provides:
//! - Gateway ports for the remote services, plus a reqwest implementation
//! - Use-case services that validate or resolve identity locally before any
//!   request leaves the process
//! - Environment-driven configuration
//!
//! Retries, caching and rendering are deliberately absent.

pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod service;

pub use config::ClientConfig;
pub use error::ClientError;
pub use gateway::{CategoryGateway, ForumGateway, RegistrationGateway, RemoteCallFailure, RemoteReply};
pub use http::HttpGateway;
pub use service::{CategoryService, ForumService, RegistrationService};
