//! Conversation message domain model.
//!
//! `Message` is a real sum type, not a role tag plus sometimes-meaningful
//! fields. At most one `System` message exists per conversation and, when
//! present, it is always the first element — that invariant is owned by the
//! injection controller in `vendia-context`, not enforced here.

use serde::{Deserialize, Serialize};

use crate::proofs::{EmptyStringError, NonEmptyString};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemMessage {
    content: NonEmptyString,
}

impl SystemMessage {
    #[must_use]
    pub fn new(content: NonEmptyString) -> Self {
        Self { content }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserMessage {
    content: NonEmptyString,
    /// What the UI renders for this turn, when it differs from the composed
    /// outbound content (screen/context segments are hidden from the user).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    display_content: Option<NonEmptyString>,
}

impl UserMessage {
    #[must_use]
    pub fn new(content: NonEmptyString) -> Self {
        Self {
            content,
            display_content: None,
        }
    }

    #[must_use]
    pub fn with_display(content: NonEmptyString, display_content: NonEmptyString) -> Self {
        Self {
            content,
            display_content: Some(display_content),
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }

    #[must_use]
    pub fn display_content(&self) -> &str {
        self.display_content
            .as_ref()
            .map_or_else(|| self.content.as_str(), NonEmptyString::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantMessage {
    content: NonEmptyString,
}

impl AssistantMessage {
    #[must_use]
    pub fn new(content: NonEmptyString) -> Self {
        Self { content }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Message {
    System(SystemMessage),
    User(UserMessage),
    Assistant(AssistantMessage),
}

impl Message {
    #[must_use]
    pub fn system(content: NonEmptyString) -> Self {
        Self::System(SystemMessage::new(content))
    }

    #[must_use]
    pub fn user(content: NonEmptyString) -> Self {
        Self::User(UserMessage::new(content))
    }

    #[must_use]
    pub fn user_with_display(content: NonEmptyString, display_content: NonEmptyString) -> Self {
        Self::User(UserMessage::with_display(content, display_content))
    }

    #[must_use]
    pub fn assistant(content: NonEmptyString) -> Self {
        Self::Assistant(AssistantMessage::new(content))
    }

    pub fn try_system(content: impl Into<String>) -> Result<Self, EmptyStringError> {
        Ok(Self::system(NonEmptyString::new(content)?))
    }

    pub fn try_user(content: impl Into<String>) -> Result<Self, EmptyStringError> {
        Ok(Self::user(NonEmptyString::new(content)?))
    }

    pub fn try_assistant(content: impl Into<String>) -> Result<Self, EmptyStringError> {
        Ok(Self::assistant(NonEmptyString::new(content)?))
    }

    #[must_use]
    pub fn role_str(&self) -> &'static str {
        match self {
            Message::System(_) => "system",
            Message::User(_) => "user",
            Message::Assistant(_) => "assistant",
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            Message::System(m) => m.content(),
            Message::User(m) => m.content(),
            Message::Assistant(m) => m.content(),
        }
    }

    #[must_use]
    pub fn display_content(&self) -> &str {
        match self {
            Message::User(m) => m.display_content(),
            other => other.content(),
        }
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Message::System(_))
    }

    /// Character length of the wire content, as counted by the history
    /// budgets.
    #[must_use]
    pub fn content_chars(&self) -> usize {
        self.content().chars().count()
    }
}
