//! `studio-ai`
//!
//! **Responsibility:** chat-completion access for the studio's AI assistants.
//!
//! This crate knows nothing about authentication or HTTP routing; it builds
//! prompts, talks to the LLM provider, and hands back either a parsed result
//! or the provider's raw event stream.

pub mod client;
pub mod error;
pub mod messages;
pub mod prompts;

pub use client::{CompletionClient, CompletionStream, DEFAULT_BASE_URL};
pub use error::CompletionError;
pub use messages::{ChatMessage, MessageRole};
pub use prompts::{EditSqlResult, edit_sql_messages, policy_messages};
