//! Stateless chat relay.
//!
//! Reshapes a client `ChatRequest` into the upstream content list and
//! reshapes the model's answer back into reply text. The relay keeps no
//! conversation state: context comes entirely from the client's history.

use relaychat_types::chat::Turn;
use relaychat_types::error::RelayError;
use relaychat_types::wire::ChatRequest;
use tracing::{debug, warn};

use crate::llm::provider::GenerativeModel;

/// Build the upstream content list: `history` followed by one user turn
/// wrapping `message` (and its attachment).
///
/// The result always has `history.len() + 1` entries.
pub fn build_contents(request: &ChatRequest) -> Vec<Turn> {
    let mut contents = Vec::with_capacity(request.history.len() + 1);
    contents.extend(request.history.iter().cloned());
    contents.push(request.user_turn());
    contents
}

/// Forwards chat requests to a generative model.
///
/// Generic over `GenerativeModel` so the HTTP layer never sees provider
/// details.
pub struct RelayService<G: GenerativeModel> {
    model: G,
}

impl<G: GenerativeModel> RelayService<G> {
    pub fn new(model: G) -> Self {
        Self { model }
    }

    /// Access the underlying model.
    pub fn model(&self) -> &G {
        &self.model
    }

    /// Validate the request, call the model, and return the reply text as-is.
    pub async fn relay(&self, request: &ChatRequest) -> Result<String, RelayError> {
        request.validate()?;

        let contents = build_contents(request);
        debug!(
            provider = self.model.name(),
            model = self.model.model(),
            contents = contents.len(),
            "Relaying chat request"
        );

        match self.model.generate(&contents).await {
            Ok(generation) => Ok(generation.text),
            Err(e) => {
                warn!(provider = self.model.name(), error = %e, "Upstream generation failed");
                Err(RelayError::Upstream(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use relaychat_types::chat::{Attachment, Role};
    use relaychat_types::llm::{Generation, LlmError};

    use super::*;

    /// Records every content list it receives and answers from a script.
    struct ScriptedModel {
        answer: Result<String, fn() -> LlmError>,
        seen: Mutex<Vec<Vec<Turn>>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Self {
            Self {
                answer: Ok(text.to_string()),
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: fn() -> LlmError) -> Self {
            Self {
                answer: Err(err),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl GenerativeModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        fn model(&self) -> &str {
            "scripted-1"
        }

        async fn generate(&self, contents: &[Turn]) -> Result<Generation, LlmError> {
            self.seen.lock().unwrap().push(contents.to_vec());
            match &self.answer {
                Ok(text) => Ok(Generation::text(text.clone(), "scripted-1")),
                Err(make) => Err(make()),
            }
        }
    }

    fn request(message: &str, history: Vec<Turn>) -> ChatRequest {
        ChatRequest {
            message: message.to_string(),
            history,
            attachment: None,
        }
    }

    #[test]
    fn test_build_contents_appends_user_turn() {
        let history = vec![Turn::user("Hello"), Turn::model("Hi there")];
        let contents = build_contents(&request("How are you?", history.clone()));

        assert_eq!(contents.len(), history.len() + 1);
        assert_eq!(&contents[..2], &history[..]);
        let last = contents.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.text, "How are you?");
    }

    #[test]
    fn test_build_contents_empty_history() {
        let contents = build_contents(&request("Hello", Vec::new()));
        assert_eq!(contents, vec![Turn::user("Hello")]);
    }

    #[test]
    fn test_build_contents_carries_attachment() {
        let attachment = Attachment::from_bytes(b"jpeg", "image/jpeg");
        let req = ChatRequest {
            message: "what is in this picture".to_string(),
            history: Vec::new(),
            attachment: Some(attachment.clone()),
        };
        let contents = build_contents(&req);
        assert_eq!(contents[0].attachment, Some(attachment));
    }

    #[tokio::test]
    async fn test_relay_returns_candidate_text() {
        let service = RelayService::new(ScriptedModel::replying("Hi there"));
        let reply = service.relay(&request("Hello", Vec::new())).await.unwrap();
        assert_eq!(reply, "Hi there");

        let seen = service.model().seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], vec![Turn::user("Hello")]);
    }

    #[tokio::test]
    async fn test_relay_sends_history_plus_one() {
        let service = RelayService::new(ScriptedModel::replying("fine"));
        let history = vec![
            Turn::user("one"),
            Turn::model("two"),
            Turn::user("three"),
            Turn::model("four"),
        ];
        service.relay(&request("five", history)).await.unwrap();

        let seen = service.model().seen.lock().unwrap();
        assert_eq!(seen[0].len(), 5);
        assert_eq!(seen[0][4], Turn::user("five"));
    }

    #[tokio::test]
    async fn test_relay_upstream_failure() {
        let service = RelayService::new(ScriptedModel::failing(|| LlmError::EmptyResponse));
        let err = service.relay(&request("Hello", Vec::new())).await.unwrap_err();
        assert!(matches!(err, RelayError::Upstream(LlmError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_relay_rejects_empty_message_without_calling_model() {
        let service = RelayService::new(ScriptedModel::replying("unused"));
        let err = service.relay(&request("  ", Vec::new())).await.unwrap_err();
        assert!(matches!(err, RelayError::Invalid(_)));
        assert!(service.model().seen.lock().unwrap().is_empty());
    }
}
