//! `HttpRelayClient` -- reqwest implementation of the client-side ports.
//!
//! Speaks the relay's JSON surface: `POST {base}/chat`,
//! `POST {base}/save-chat`, and `GET {base}/get-chat`. Non-2xx responses
//! surface the relay's `{error}` message when one is present.

use relaychat_core::chat::client::{RelayClient, TranscriptSink};
use relaychat_types::chat::{ChatRecord, NewChatRecord};
use relaychat_types::error::ClientError;
use relaychat_types::wire::{ChatReply, ChatRequest, ErrorBody, SaveChatRequest, SaveChatResponse};
use serde::de::DeserializeOwned;

/// Client for one relay server. Cheap to clone; clones share connections.
#[derive(Debug, Clone)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpRelayClient {
    /// `base_url` includes the API prefix, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch every stored transcript record, oldest first.
    pub async fn transcript(&self) -> Result<Vec<ChatRecord>, ClientError> {
        let response = self
            .client
            .get(self.url("get-chat"))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        decode(response).await
    }
}

/// Turn a relay response into `T`, or into a `ClientError` carrying the
/// relay's error message.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|b| b.error)
            .unwrap_or(text);
        return Err(ClientError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| ClientError::Decode(e.to_string()))
}

impl RelayClient for HttpRelayClient {
    async fn send_chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        let response = self
            .client
            .post(self.url("chat"))
            .json(request)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        decode(response).await
    }
}

impl TranscriptSink for HttpRelayClient {
    async fn save(&self, record: &NewChatRecord) -> Result<(), ClientError> {
        let body = SaveChatRequest {
            role: record.role.clone(),
            text: record.text.clone(),
        };
        let response = self
            .client
            .post(self.url("save-chat"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let saved: SaveChatResponse = decode(response).await?;
        if saved.success {
            Ok(())
        } else {
            Err(ClientError::Decode("relay reported success: false".to_string()))
        }
    }
}
