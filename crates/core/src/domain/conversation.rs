use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Borrowed view over a non-empty transcript.
#[derive(Clone, Copy, Debug)]
pub struct Transcript<'a> {
    messages: &'a [Message],
}

impl<'a> Transcript<'a> {
    pub fn new(messages: &'a [Message]) -> Result<Self, DomainError> {
        if messages.is_empty() {
            return Err(DomainError::EmptyTranscript);
        }
        Ok(Self { messages })
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn latest(&self) -> &'a Message {
        // non-empty by construction
        &self.messages[self.messages.len() - 1]
    }

    pub fn latest_normalized(&self) -> String {
        self.latest().content.to_lowercase()
    }
}
