//! Request and response bodies of the relay HTTP surface.
//!
//! These are the validated schemas at the relay boundary. Both the server
//! handlers and the HTTP relay client speak exactly these shapes.

use serde::{Deserialize, Serialize};

use crate::chat::{Attachment, Turn};
use crate::error::ValidationError;

/// Body of `POST /api/chat`.
///
/// `history` holds the turns *before* the new message; the relay appends one
/// synthesized user turn wrapping `message` and `attachment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<Turn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
}

impl ChatRequest {
    /// Reject requests that carry nothing to send or a broken attachment.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.message.trim().is_empty() && self.attachment.is_none() {
            return Err(ValidationError::EmptyMessage);
        }
        if let Some(attachment) = &self.attachment {
            attachment.validate()?;
        }
        for turn in &self.history {
            if let Some(attachment) = &turn.attachment {
                attachment.validate()?;
            }
        }
        Ok(())
    }

    /// The new user turn this request represents.
    pub fn user_turn(&self) -> Turn {
        Turn::user(self.message.clone()).with_attachment(self.attachment.clone())
    }
}

/// Successful body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Body of `POST /api/save-chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChatRequest {
    pub role: String,
    pub text: String,
}

/// Successful body of `POST /api/save-chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveChatResponse {
    pub success: bool,
}

/// Error body returned with every non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_history_defaults_to_empty() {
        let req: ChatRequest = serde_json::from_str(r#"{"message": "Hello"}"#).unwrap();
        assert_eq!(req.message, "Hello");
        assert!(req.history.is_empty());
        assert!(req.attachment.is_none());
    }

    #[test]
    fn test_chat_request_rejects_unknown_role() {
        let result: Result<ChatRequest, _> = serde_json::from_str(
            r#"{"message": "Hi", "history": [{"role": "assistant", "text": "x"}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_empty_message_without_attachment() {
        let req = ChatRequest {
            message: "   ".to_string(),
            history: Vec::new(),
            attachment: None,
        };
        assert!(matches!(req.validate(), Err(ValidationError::EmptyMessage)));
    }

    #[test]
    fn test_validate_empty_message_with_attachment() {
        let req = ChatRequest {
            message: String::new(),
            history: Vec::new(),
            attachment: Some(Attachment::from_bytes(b"img", "image/png")),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_checks_history_attachments() {
        let req = ChatRequest {
            message: "and this?".to_string(),
            history: vec![Turn::user("see").with_attachment(Some(Attachment {
                data: "%%%".to_string(),
                mime_type: "image/png".to_string(),
            }))],
            attachment: None,
        };
        assert!(matches!(req.validate(), Err(ValidationError::InvalidAttachment(_))));
    }

    #[test]
    fn test_user_turn_carries_attachment() {
        let attachment = Attachment::from_bytes(b"img", "image/png");
        let req = ChatRequest {
            message: "what is this".to_string(),
            history: Vec::new(),
            attachment: Some(attachment.clone()),
        };
        let turn = req.user_turn();
        assert_eq!(turn.text, "what is this");
        assert_eq!(turn.attachment, Some(attachment));
    }
}
