//! Conversation turn and chat record types for relaychat.
//!
//! A `Turn` is what travels between the client, the relay, and the upstream
//! model. A `ChatRecord` is what the transcript store keeps: one row per turn,
//! stamped with the server clock.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Speaker of a conversation turn.
///
/// Serialized lowercase to match the upstream content roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Model => write!(f, "model"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "model" => Ok(Role::Model),
            other => Err(format!("invalid role: '{other}'")),
        }
    }
}

/// Binary payload attached to a user turn (typically an image).
///
/// `data` is standard base64 without the `data:` URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub data: String,
    pub mime_type: String,
}

impl Attachment {
    /// Encode raw bytes into an attachment.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Check that the mime type is present and the payload is valid base64.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.mime_type.trim().is_empty() {
            return Err(ValidationError::MissingMimeType);
        }
        STANDARD
            .decode(self.data.as_bytes())
            .map_err(|e| ValidationError::InvalidAttachment(e.to_string()))?;
        Ok(())
    }
}

/// One message exchanged in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            attachment: None,
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: Option<Attachment>) -> Self {
        self.attachment = attachment;
        self
    }

    /// The same turn with its attachment removed.
    pub fn without_attachment(self) -> Self {
        self.with_attachment(None)
    }
}

/// A persisted transcript entry.
///
/// `role` is deliberately a free string: the store does not check it against
/// [`Role`]. Records are listed by `created_at` ascending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRecord {
    pub id: Uuid,
    pub role: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A transcript entry before the store assigns its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewChatRecord {
    pub role: String,
    pub text: String,
}

impl NewChatRecord {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            text: text.into(),
        }
    }
}

impl From<&Turn> for NewChatRecord {
    fn from(turn: &Turn) -> Self {
        Self::new(turn.role.to_string(), turn.text.clone())
    }
}
