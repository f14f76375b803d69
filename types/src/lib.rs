//! Core domain types for the Vendia assistant.
//!
//! This crate holds the pure data model shared by every other crate in the
//! workspace: the conversation `Message` sum type, validated-content proof
//! types, session facts, and small pure helpers (fingerprinting, text
//! truncation). No IO, no async.

mod entity;
mod facts;
mod fingerprint;
mod message;
mod proofs;
mod text;

pub use entity::Entity;
pub use facts::{MAX_BREADCRUMBS, SessionFacts};
pub use fingerprint::fingerprint;
pub use message::{AssistantMessage, Message, SystemMessage, UserMessage};
pub use proofs::{EmptyStringError, NonEmptyString};
pub use text::truncate_chars;
