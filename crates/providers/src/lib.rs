//! LLM completion providers for Ninety.
//!
//! All providers implement the `ninety_core::CompletionProvider` trait.
//! The gateway builds one provider per process from configuration and
//! injects it into the coaching pipeline.

pub mod openai;

pub use openai::OpenAiProvider;
