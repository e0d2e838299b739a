//! # Ninety Core
//!
//! Domain types, traits, and error definitions for the Ninety coaching API.
//! This crate has **zero framework dependencies** — it defines the domain model
//! that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The completion backend is defined as a trait here; the HTTP client lives in
//! `ninety-providers`. This enables:
//! - Swapping backends via configuration
//! - Testing the coaching pipeline with mock/stub providers
//! - Clean dependency graph (all crates depend inward on core)

pub mod envelope;
pub mod error;
pub mod message;
pub mod provider;
pub mod request;

// Re-export key types at crate root for ergonomics
pub use envelope::{CoachReply, ReplyMode};
pub use error::{Error, ProviderError, RequestError, Result};
pub use message::{Message, Role};
pub use provider::{CompletionProvider, CompletionRequest, CompletionResponse, Usage};
pub use request::{CoachRequest, ProfileSource};
